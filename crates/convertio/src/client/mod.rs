//! Convertio HTTP client module.
//!
//! This module provides the client configuration, the endpoint routing table
//! and the client exposing one method per API endpoint.

mod cv_client;
mod cv_config;
mod endpoint;

pub use cv_client::ConvertioClient;
pub use cv_config::{ConvertioConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use endpoint::Endpoint;
