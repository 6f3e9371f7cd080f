//! Error types for the Convertio client.
//!
//! Failures are split into three kinds that are never conflated:
//!
//! - [`TransportError`]: the call could not complete and no body was obtained.
//! - [`ErrorEnvelope`]: the service answered with its uniform error envelope.
//! - [`SchemaError`]: a parameter or a response body did not match its schema.
//!
//! [`ErrorEnvelope`]: crate::response::ErrorEnvelope

use std::fmt;

use strum::{AsRefStr, Display, IntoStaticStr};

use crate::response::ErrorEnvelope;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for all Convertio operations in this crate.
///
/// This is a convenience type alias that defaults to using [`Error`] as the error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for Convertio operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not complete (network failure, timeout, DNS, reset).
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The service returned a well-formed error envelope.
    #[error("Service error (code {}): {}", .0.code, .0.error)]
    Service(ErrorEnvelope),

    /// A parameter or response body violated its schema.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Writing result content to disk failed.
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Client configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns `true` if the call failed before a body was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if the service reported the failure.
    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service(_))
    }

    /// Returns `true` if a parameter or response failed schema checks.
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }

    /// Returns the error envelope reported by the service, if any.
    pub fn service_error(&self) -> Option<&ErrorEnvelope> {
        match self {
            Self::Service(envelope) => Some(envelope),
            _ => None,
        }
    }

    /// Returns the schema error, if any.
    pub fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            Self::Schema(err) => Some(err),
            _ => None,
        }
    }

    /// Get the status code reported by the service envelope.
    pub fn status_code(&self) -> Option<u16> {
        self.service_error().map(|envelope| envelope.code)
    }

    /// Get the error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Service(_) => "service",
            Self::Schema(_) => "schema",
            Self::Io(_) => "io",
            Self::Config { .. } => "config",
        }
    }
}

impl From<ErrorEnvelope> for Error {
    fn from(envelope: ErrorEnvelope) -> Self {
        Self::Service(envelope)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Schema(SchemaError::from(err))
    }
}

/// Categories of transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum TransportErrorKind {
    /// The request exceeded its timeout.
    Timeout,
    /// A connection could not be established.
    Connect,
    /// The request could not be built or sent.
    Request,
    /// The response body could not be read.
    Body,
    /// A source download answered with a non-success status.
    Status,
}

/// Failure of the underlying HTTP exchange.
#[must_use]
#[derive(Debug, thiserror::Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct TransportError {
    /// The kind of failure.
    pub kind: TransportErrorKind,
    /// Primary error message.
    pub message: Option<String>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
}

impl TransportError {
    /// Creates a new error with the given kind.
    pub fn new(kind: TransportErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Creates a timeout error.
    pub fn timeout() -> Self {
        Self::new(TransportErrorKind::Timeout)
    }

    /// Creates a connection error.
    pub fn connect() -> Self {
        Self::new(TransportErrorKind::Connect)
    }

    /// Creates a request error.
    pub fn request() -> Self {
        Self::new(TransportErrorKind::Request)
    }

    /// Creates an error for a non-success status on a source download.
    pub fn status(status: u16) -> Self {
        Self::new(TransportErrorKind::Status).with_message(format!("HTTP {status}"))
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        self.kind == TransportErrorKind::Timeout
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_body() || err.is_decode() {
            TransportErrorKind::Body
        } else {
            TransportErrorKind::Request
        };

        Self::new(kind)
            .with_message(err.to_string())
            .with_source(err)
    }
}

/// Categories of schema violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum SchemaErrorKind {
    /// A required field is absent.
    Missing,
    /// A value is outside its closed set.
    UnknownVariant,
    /// A value has the wrong primitive type.
    InvalidType,
    /// A value violates a range, length or format constraint.
    InvalidValue,
    /// Base64 content could not be decoded.
    CorruptContent,
    /// The body is not well-formed JSON.
    Malformed,
}

/// A parameter or response body that does not match its schema.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct SchemaError {
    /// The violated constraint.
    pub kind: SchemaErrorKind,
    /// Dotted path of the offending field, when known.
    pub field: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "[{}] field '{}': {}", self.kind, field, self.message),
            None => write!(f, "[{}] {}", self.kind, self.message),
        }
    }
}

impl SchemaError {
    /// Creates a new schema error.
    pub fn new(kind: SchemaErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
        }
    }

    /// Creates an error for a missing required field.
    pub fn missing(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(SchemaErrorKind::Missing, format!("missing field `{field}`")).with_field(field)
    }

    /// Creates an error for a value outside its closed set.
    pub fn unknown_variant(field: impl Into<String>, value: &str, expected: &[&str]) -> Self {
        Self::new(
            SchemaErrorKind::UnknownVariant,
            format!(
                "unknown variant `{value}`, expected one of {}",
                expected.join(", ")
            ),
        )
        .with_field(field)
    }

    /// Creates an error for a constraint violation.
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(SchemaErrorKind::InvalidValue, message).with_field(field)
    }

    /// Creates an error for undecodable base64 content.
    pub fn corrupt_content(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(SchemaErrorKind::CorruptContent, message).with_field(field)
    }

    /// Sets the offending field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        let message = err.to_string();

        if !err.is_data() {
            return Self::new(SchemaErrorKind::Malformed, message);
        }

        if message.starts_with("missing field") {
            let field = backticked(&message);
            let err = Self::new(SchemaErrorKind::Missing, message);
            return match field {
                Some(field) => err.with_field(field),
                None => err,
            };
        }

        let kind = if message.starts_with("unknown variant") {
            SchemaErrorKind::UnknownVariant
        } else if message.starts_with("invalid type") {
            SchemaErrorKind::InvalidType
        } else {
            SchemaErrorKind::InvalidValue
        };

        Self::new(kind, message)
    }
}

/// Extracts the first `` `quoted` `` token from a serde message.
fn backticked(message: &str) -> Option<String> {
    let start = message.find('`')? + 1;
    let len = message[start..].find('`')?;
    Some(message[start..start + len].to_string())
}
