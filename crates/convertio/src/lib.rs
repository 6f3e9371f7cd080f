#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for client operations.
pub const TRACING_TARGET_CLIENT: &str = "convertio::client";

/// Tracing target for HTTP transport operations.
pub const TRACING_TARGET_TRANSPORT: &str = "convertio::transport";

pub mod client;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;
#[doc(hidden)]
pub mod prelude;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;

pub use crate::client::{ConvertioClient, ConvertioConfig};
pub use crate::error::{Error, Result};
