//! Endpoint routing.

use reqwest::Method;
use url::Url;

use crate::types::{JobId, ResultEncoding};
use crate::{Error, Result};

/// One of the six API endpoints, with its path parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `POST /convert`
    NewConversion,
    /// `PUT /convert/{id}/{filename}`
    DirectFileUpload { id: &'a JobId, filename: &'a str },
    /// `GET /convert/{id}/status`
    GetStatus { id: &'a JobId },
    /// `GET /convert/{id}/dl/{type}`
    GetResult {
        id: &'a JobId,
        encoding: ResultEncoding,
    },
    /// `DELETE /convert/{id}`
    DeleteCancel { id: &'a JobId },
    /// `POST /convert/list`
    ListConversions,
}

impl Endpoint<'_> {
    /// HTTP method of the endpoint.
    pub fn method(&self) -> Method {
        match self {
            Self::NewConversion | Self::ListConversions => Method::POST,
            Self::DirectFileUpload { .. } => Method::PUT,
            Self::GetStatus { .. } | Self::GetResult { .. } => Method::GET,
            Self::DeleteCancel { .. } => Method::DELETE,
        }
    }

    /// Short name used in log records.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewConversion => "new_conversion",
            Self::DirectFileUpload { .. } => "direct_file_upload",
            Self::GetStatus { .. } => "get_conversion_status",
            Self::GetResult { .. } => "get_result_file",
            Self::DeleteCancel { .. } => "delete_or_cancel_conversion",
            Self::ListConversions => "list_conversions",
        }
    }

    /// Unencoded path segments below the base URL.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Self::NewConversion => vec!["convert"],
            Self::DirectFileUpload { id, filename } => vec!["convert", id.as_str(), *filename],
            Self::GetStatus { id } => vec!["convert", id.as_str(), "status"],
            Self::GetResult { id, encoding } => {
                let mut segments = vec!["convert", id.as_str(), "dl"];
                segments.extend(encoding.path_segment());
                segments
            }
            Self::DeleteCancel { id } => vec!["convert", id.as_str()],
            Self::ListConversions => vec!["convert", "list"],
        }
    }

    /// Resolves the endpoint against `base`, percent-encoding each segment.
    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::config(format!("Base URL '{}' cannot be a base", base)))?
            .pop_if_empty()
            .extend(self.segments());
        Ok(url)
    }
}
