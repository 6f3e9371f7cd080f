//! Parameters of the endpoints addressing an existing conversion.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use url::Url;
use validator::Validate;

use super::{Parameters, validate_job_id};
use crate::error::SchemaError;
use crate::types::{ClosedSet, JobId, ResultEncoding, StatusFilter};

/// Where the bytes of a direct upload come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadSource {
    /// Downloaded from this URL before being forwarded.
    Url(Url),
    /// Provided by the caller.
    Bytes(Bytes),
}

/// Parameters of `PUT /convert/{id}/{filename}`.
///
/// Only needed when the conversion was started with the `upload` input method.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DirectFileUpload {
    /// Conversion id, obtained from `POST /convert`.
    #[validate(custom(function = "validate_job_id"))]
    pub id: JobId,

    /// Input filename including extension.
    #[validate(length(min = 1))]
    pub filename: String,

    /// Source of the file content.
    pub source: UploadSource,
}

impl DirectFileUpload {
    /// Uploads the file found at `source`.
    pub fn from_url(id: impl Into<JobId>, filename: impl Into<String>, source: Url) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            source: UploadSource::Url(source),
        }
    }

    /// Uploads caller-provided bytes.
    pub fn from_bytes(
        id: impl Into<JobId>,
        filename: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            source: UploadSource::Bytes(content.into()),
        }
    }
}

impl Parameters for DirectFileUpload {}

/// Parameters of `GET /convert/{id}/status`.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GetStatus {
    /// Conversion id, obtained from `POST /convert`.
    #[validate(custom(function = "validate_job_id"))]
    pub id: JobId,
}

impl GetStatus {
    /// Queries the status of conversion `id`.
    pub fn new(id: impl Into<JobId>) -> Self {
        Self { id: id.into() }
    }
}

impl Parameters for GetStatus {}

/// Parameters of `GET /convert/{id}/dl/{type}`.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GetResult {
    /// Conversion id, obtained from `POST /convert`.
    #[validate(custom(function = "validate_job_id"))]
    pub id: JobId,

    /// Download variant; content is base64 encoded either way.
    #[serde(default, rename = "type")]
    pub encoding: ResultEncoding,
}

impl GetResult {
    /// Downloads the result of conversion `id` as base64.
    pub fn new(id: impl Into<JobId>) -> Self {
        Self {
            id: id.into(),
            encoding: ResultEncoding::default(),
        }
    }

    /// Sets the download variant.
    pub fn with_encoding(mut self, encoding: ResultEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

impl Parameters for GetResult {}

/// Parameters of `DELETE /convert/{id}`.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DeleteCancel {
    /// Conversion id, obtained from `POST /convert`.
    #[validate(custom(function = "validate_job_id"))]
    pub id: JobId,
}

impl DeleteCancel {
    /// Deletes or cancels conversion `id`.
    pub fn new(id: impl Into<JobId>) -> Self {
        Self { id: id.into() }
    }
}

impl Parameters for DeleteCancel {}

/// Parameters of `POST /convert/list`.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ListConversions {
    /// Filter by job status.
    #[serde(default)]
    pub status: StatusFilter,

    /// Number of latest jobs to return.
    #[validate(range(min = 1))]
    pub count: u32,
}

impl ListConversions {
    /// Lists the latest `count` jobs with the given status.
    pub fn new(status: StatusFilter, count: u32) -> Self {
        Self { status, count }
    }

    /// Lists the latest `count` jobs regardless of status.
    pub fn latest(count: u32) -> Self {
        Self::new(StatusFilter::All, count)
    }

    /// Parses a textual status filter, rejecting values outside the closed set.
    pub fn parse(status: &str, count: u32) -> Result<Self, SchemaError> {
        Self::new(StatusFilter::parse_field("status", status)?, count).checked()
    }
}

impl Parameters for ListConversions {}
