//! Result file content.
//!
//! The download endpoint carries the converted file as base64 text. The text
//! is decoded while building [`ResultContent`], so a constructed value always
//! holds raw bytes.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::{Deserialize, Serialize, Serializer};

use crate::TRACING_TARGET_CLIENT;
use crate::error::{Result, SchemaError};
use crate::types::JobId;

/// Wire form of the download payload, before decoding.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EncodedContent {
    id: JobId,
    #[serde(default, rename = "type")]
    content_type: Option<String>,
    #[serde(default, rename = "encode")]
    encoding: Option<String>,
    content: String,
}

/// Payload of `GET /convert/{id}/dl/{type}` with decoded file content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EncodedContent")]
pub struct ResultContent {
    /// Conversion id.
    pub id: JobId,
    /// Content type reported by the service.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Transfer encoding reported by the service.
    #[serde(rename = "encode", skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    /// Decoded file content.
    #[serde(serialize_with = "encode_base64")]
    pub content: Bytes,
}

impl TryFrom<EncodedContent> for ResultContent {
    type Error = SchemaError;

    fn try_from(encoded: EncodedContent) -> Result<Self, Self::Error> {
        let content = STANDARD.decode(encoded.content.trim()).map_err(|e| {
            SchemaError::corrupt_content("data.content", format!("invalid base64 content: {e}"))
        })?;

        Ok(Self {
            id: encoded.id,
            content_type: encoded.content_type,
            encoding: encoded.encoding,
            content: Bytes::from(content),
        })
    }
}

impl ResultContent {
    /// Size of the decoded content in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns `true` if the decoded content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Writes the content to `file_name` inside `output_dir`.
    ///
    /// Returns the path written to.
    pub async fn save(
        &self,
        output_dir: impl AsRef<Path>,
        file_name: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        self.save_to(output_dir.as_ref().join(file_name)).await
    }

    /// Writes the content to `path`, replacing any existing file.
    pub async fn save_to(&self, path: impl Into<PathBuf>) -> Result<PathBuf> {
        let path = path.into();

        tokio::fs::write(&path, &self.content).await.map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to write file '{}': {}", path.display(), e),
            )
        })?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            id = %self.id,
            path = %path.display(),
            size = self.content.len(),
            "Result content saved"
        );

        Ok(path)
    }
}

fn encode_base64<S: Serializer>(content: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(content))
}
