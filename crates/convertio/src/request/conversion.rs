//! Parameters for starting a new conversion.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{Parameters, field_error};
use crate::types::{InputMethod, Language};

/// Parameters of `POST /convert`.
///
/// # Examples
///
/// ```rust
/// use convertio::request::{NewConversion, OcrOptions, Parameters};
/// use convertio::types::Language;
///
/// let params = NewConversion::from_url("https://example.com/scan.pdf", "txt")
///     .with_options(OcrOptions::enabled([Language::English]))
///     .checked()
///     .unwrap();
/// assert_eq!(params.output_format, "txt");
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_input"))]
pub struct NewConversion {
    /// Method of providing the input file.
    #[serde(default)]
    pub input: InputMethod,

    /// URL of the input file, its content for raw/base64 input, or the name
    /// of the file sent later for upload input.
    pub file: String,

    /// Input filename including extension. Required for raw/base64 input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub filename: Option<String>,

    /// Output format the file should be converted to.
    #[serde(rename = "outputformat")]
    #[validate(length(min = 1))]
    pub output_format: String,

    /// Conversion options (OCR).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub options: Option<OcrOptions>,
}

impl NewConversion {
    /// Creates parameters with the default `url` input method.
    pub fn new(file: impl Into<String>, output_format: impl Into<String>) -> Self {
        Self {
            input: InputMethod::default(),
            file: file.into(),
            filename: None,
            output_format: output_format.into(),
            options: None,
        }
    }

    /// Converts a file the service downloads from `url`.
    pub fn from_url(url: impl Into<String>, output_format: impl Into<String>) -> Self {
        Self::new(url, output_format)
    }

    /// Converts raw file content sent inline.
    pub fn raw(
        content: impl Into<String>,
        filename: impl Into<String>,
        output_format: impl Into<String>,
    ) -> Self {
        Self::new(content, output_format)
            .with_input(InputMethod::Raw)
            .with_filename(filename)
    }

    /// Converts binary content, sent inline as base64.
    pub fn base64(
        content: impl AsRef<[u8]>,
        filename: impl Into<String>,
        output_format: impl Into<String>,
    ) -> Self {
        Self::new(STANDARD.encode(content), output_format)
            .with_input(InputMethod::Base64)
            .with_filename(filename)
    }

    /// Creates a job whose file is sent later through a direct upload.
    ///
    /// `filename` is sent as both `file` and `filename`.
    pub fn upload(filename: impl Into<String>, output_format: impl Into<String>) -> Self {
        let filename = filename.into();
        Self::new(filename.clone(), output_format)
            .with_input(InputMethod::Upload)
            .with_filename(filename)
    }

    /// Sets the input method.
    pub fn with_input(mut self, input: InputMethod) -> Self {
        self.input = input;
        self
    }

    /// Sets the input filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Sets the OCR options.
    pub fn with_options(mut self, options: OcrOptions) -> Self {
        self.options = Some(options);
        self
    }
}

impl Parameters for NewConversion {}

fn validate_input(params: &NewConversion) -> Result<(), ValidationError> {
    if params.file.trim().is_empty() {
        return Err(field_error("required", "file", "file must not be empty"));
    }

    if params.input.is_inline() && params.filename.is_none() {
        return Err(field_error(
            "required",
            "filename",
            "filename is required when input is `raw` or `base64`",
        ));
    }

    Ok(())
}

/// Conversion options enabling OCR.
#[must_use]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_ocr_options"))]
pub struct OcrOptions {
    /// Enables OCR when `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_enabled: Option<bool>,

    /// Recognition settings. Required when OCR is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub ocr_settings: Option<OcrSettings>,
}

impl OcrOptions {
    /// Enables OCR for the given languages.
    pub fn enabled(langs: impl IntoIterator<Item = Language>) -> Self {
        Self {
            ocr_enabled: Some(true),
            ocr_settings: Some(OcrSettings::new(langs)),
        }
    }

    /// Sets whether OCR is enabled.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.ocr_enabled = Some(enabled);
        self
    }

    /// Sets the OCR settings.
    pub fn with_settings(mut self, settings: OcrSettings) -> Self {
        self.ocr_settings = Some(settings);
        self
    }
}

fn validate_ocr_options(options: &OcrOptions) -> Result<(), ValidationError> {
    if options.ocr_enabled == Some(true) && options.ocr_settings.is_none() {
        return Err(field_error(
            "required",
            "ocr_settings",
            "ocr_settings is required when OCR is enabled",
        ));
    }
    Ok(())
}

/// OCR recognition settings.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_ocr_settings"))]
pub struct OcrSettings {
    /// Pages to recognize, e.g. `"1-3,5,7-9"`. All pages when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_nums: Option<String>,

    /// Languages to recognize.
    #[validate(length(min = 1, message = "at least one language is required"))]
    pub langs: Vec<Language>,
}

impl OcrSettings {
    /// Creates settings for the given languages.
    pub fn new(langs: impl IntoIterator<Item = Language>) -> Self {
        Self {
            page_nums: None,
            langs: langs.into_iter().collect(),
        }
    }

    /// Restricts recognition to the given page ranges.
    pub fn with_page_nums(mut self, page_nums: impl Into<String>) -> Self {
        self.page_nums = Some(page_nums.into());
        self
    }
}

fn validate_ocr_settings(settings: &OcrSettings) -> Result<(), ValidationError> {
    match &settings.page_nums {
        Some(pages) if !is_page_ranges(pages) => Err(field_error(
            "page_ranges",
            "page_nums",
            "page_nums must be a comma separated list of pages or ranges, e.g. \"1-3,5\"",
        )),
        _ => Ok(()),
    }
}

/// Checks the `"1-3,5,7-9,4"` page selection syntax.
fn is_page_ranges(pages: &str) -> bool {
    let is_page = |page: &str| {
        let page = page.trim();
        !page.is_empty() && page.bytes().all(|b| b.is_ascii_digit())
    };

    pages.split(',').all(|part| match part.split_once('-') {
        Some((start, end)) => is_page(start) && is_page(end),
        None => is_page(part),
    })
}
