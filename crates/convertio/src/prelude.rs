//! Prelude module for convertio.
//!
//! This module re-exports the most commonly used types and traits from the
//! convertio library. Import this module to get quick access to the client,
//! the parameter models and the error types.

pub use crate::client::{ConvertioClient, ConvertioConfig};
pub use crate::error::{Error, Result, SchemaError, TransportError};
pub use crate::request::{
    DeleteCancel, DirectFileUpload, GetResult, GetStatus, ListConversions, NewConversion,
    OcrOptions, OcrSettings, Parameters, UploadSource,
};
pub use crate::response::{ConversionStatus, ErrorEnvelope, JobListEntry, ResultContent};
pub use crate::transport::Transport;
pub use crate::types::{
    ConversionStep, InputMethod, JobId, JobStatus, Language, ResultEncoding, StatusFilter,
};
