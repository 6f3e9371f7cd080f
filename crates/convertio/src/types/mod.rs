//! Closed value sets accepted and returned by the Convertio API.

mod language;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr, VariantNames};

pub use self::language::Language;
use crate::error::SchemaError;

/// A closed set of string values.
///
/// Parsing text outside the set reports a [`SchemaError`] naming the field,
/// so invalid values are rejected before any request is built.
pub trait ClosedSet: FromStr + VariantNames + Sized {
    /// Parses `value` as a member of the set, attributing failures to `field`.
    fn parse_field(field: &str, value: &str) -> Result<Self, SchemaError> {
        value
            .parse()
            .map_err(|_| SchemaError::unknown_variant(field, value, Self::VARIANTS))
    }
}

/// Method of providing the input file to a new conversion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr, VariantNames)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InputMethod {
    /// `file` holds a URL the service downloads.
    #[default]
    Url,
    /// `file` holds the raw file content.
    Raw,
    /// `file` holds base64 encoded file content.
    Base64,
    /// The file is sent afterwards through a direct upload.
    Upload,
}

impl InputMethod {
    /// Whether the file content travels inline, which requires a `filename`.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Raw | Self::Base64)
    }
}

impl ClosedSet for InputMethod {}

/// Encoding requested when downloading the result file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr, VariantNames)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResultEncoding {
    /// Service default (`/dl`).
    Default,
    /// Explicit base64 download (`/dl/base64`).
    #[default]
    Base64,
}

impl ResultEncoding {
    /// Trailing path segment of the download endpoint.
    pub fn path_segment(&self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Base64 => Some("base64"),
        }
    }
}

impl ClosedSet for ResultEncoding {}

/// Status filter for listing conversions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr, VariantNames)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Uploading,
    Converting,
    Finished,
    Failed,
}

impl ClosedSet for StatusFilter {}

/// Status of a job as reported in conversion listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr, VariantNames)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Uploading,
    Converting,
    Finished,
    Failed,
    Unknown,
}

impl JobStatus {
    /// Check if the job failed
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Check if the job will not change status anymore
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Failed)
    }
}

impl ClosedSet for JobStatus {}

/// Step of a running conversion, observed through status polling.
///
/// Steps advance `wait → upload → convert → finish` on the service side, or
/// end in `failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr, VariantNames)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ConversionStep {
    Wait,
    Upload,
    Convert,
    Finish,
    Failed,
}

impl ConversionStep {
    /// Check if the conversion output is ready
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finish)
    }

    /// Check if the conversion failed
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Check if the step will not change anymore
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finish | Self::Failed)
    }
}

impl ClosedSet for ConversionStep {}

/// Literal `status` field of every response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr, VariantNames)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

impl ClosedSet for ResponseStatus {}

/// Opaque conversion identifier issued by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Wraps an identifier returned by the service.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identifier is empty.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Consumes the wrapper and returns the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
