//! Response envelopes and per-endpoint payloads.
//!
//! Every endpoint answers with the same outer envelope: a status `code`, a
//! literal `status` and either a `data` payload (success) or an `error`
//! message (failure). Which shape applies is decided by the HTTP status
//! alone; the body is then parsed strictly against that shape.

mod content;
mod job;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub(crate) use self::content::EncodedContent;
pub use self::content::ResultContent;
pub use self::job::{
    ConversionCreated, ConversionOutput, ConversionStatus, FileUploaded, JobListEntry,
};
use crate::error::{Result, SchemaError};
use crate::types::ResponseStatus;

/// Success envelope carrying an endpoint-specific `data` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// HTTP status code echoed by the service.
    pub code: u16,
    /// Always [`ResponseStatus::Ok`].
    pub status: ResponseStatus,
    /// Result data.
    pub data: T,
}

impl<T> Envelope<T> {
    /// Converts the payload, keeping the envelope fields.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Envelope<U>, E> {
        Ok(Envelope {
            code: self.code,
            status: self.status,
            data: f(self.data)?,
        })
    }
}

/// Uniform failure envelope returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// HTTP status code echoed by the service.
    pub code: u16,
    /// Always [`ResponseStatus::Error`].
    pub status: ResponseStatus,
    /// User-friendly error message.
    pub error: String,
}

impl ErrorEnvelope {
    /// Creates an error envelope.
    pub fn new(code: u16, error: impl Into<String>) -> Self {
        Self {
            code,
            status: ResponseStatus::Error,
            error: error.into(),
        }
    }
}

/// Success response of `DELETE /convert/{id}`, which has no `data` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// HTTP status code echoed by the service.
    pub code: u16,
    /// Always [`ResponseStatus::Ok`].
    pub status: ResponseStatus,
    /// User-friendly confirmation.
    pub message: String,
}

/// Response of `POST /convert`.
pub type NewConversionResponse = Envelope<ConversionCreated>;
/// Response of `PUT /convert/{id}/{filename}`.
pub type DirectFileResponse = Envelope<FileUploaded>;
/// Response of `GET /convert/{id}/status`.
pub type GetStatusResponse = Envelope<ConversionStatus>;
/// Response of `GET /convert/{id}/dl/{type}`.
pub type GetResultResponse = Envelope<ResultContent>;
/// Response of `DELETE /convert/{id}`.
pub type DeleteCancelResponse = DeleteResponse;
/// Response of `POST /convert/list`.
pub type ListConversionResponse = Envelope<Vec<JobListEntry>>;

/// A success body whose literal `status` can be checked.
pub trait SuccessBody: DeserializeOwned {
    /// The literal status carried by the body.
    fn response_status(&self) -> ResponseStatus;
}

impl<T: DeserializeOwned> SuccessBody for Envelope<T> {
    fn response_status(&self) -> ResponseStatus {
        self.status
    }
}

impl SuccessBody for DeleteResponse {
    fn response_status(&self) -> ResponseStatus {
        self.status
    }
}

/// Parses a success body into the endpoint's shape.
pub fn parse_success<T: SuccessBody>(body: &[u8]) -> Result<T, SchemaError> {
    let parsed: T = serde_json::from_slice(body)?;
    if parsed.response_status() != ResponseStatus::Ok {
        return Err(SchemaError::invalid_value(
            "status",
            "success response must carry status `ok`",
        ));
    }
    Ok(parsed)
}

/// Parses a failure body into the uniform error envelope.
pub fn parse_error(body: &[u8]) -> Result<ErrorEnvelope, SchemaError> {
    let parsed: ErrorEnvelope = serde_json::from_slice(body)?;
    if parsed.status != ResponseStatus::Error {
        return Err(SchemaError::invalid_value(
            "status",
            "error response must carry status `error`",
        ));
    }
    Ok(parsed)
}

/// Classifies a response by HTTP status, then parses the matching shape.
///
/// A 2xx status yields the success shape; any other status yields
/// [`Error::Service`] whatever the body claims. Bodies that do not fit the
/// selected shape yield [`Error::Schema`].
///
/// [`Error::Service`]: crate::Error::Service
/// [`Error::Schema`]: crate::Error::Schema
pub fn parse_response<T: SuccessBody>(status: u16, body: &[u8]) -> Result<T> {
    if (200..300).contains(&status) {
        Ok(parse_success(body)?)
    } else {
        Err(parse_error(body)?.into())
    }
}

/// Like [`parse_response`] for the result download, decoding its base64 content.
pub fn parse_result_response(status: u16, body: &[u8]) -> Result<GetResultResponse> {
    let envelope: Envelope<EncodedContent> = parse_response(status, body)?;
    Ok(envelope.try_map(ResultContent::try_from)?)
}
