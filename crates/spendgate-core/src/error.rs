//! Shared error type across spendgate crates.

use thiserror::Error;

/// Caller-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A policy field failed structural or range validation.
    SchemaViolation,
    /// Serialization failed (amount scaling overflow, malformed field).
    EncodingError,
    /// Wire bytes do not match the expected tuple layout.
    DecodingError,
    /// Invalid configuration or deployment manifest.
    BadConfig,
    /// No action registered under the requested name.
    UnknownAction,
    /// Action arguments rejected before anything was submitted.
    InvalidArgument,
    /// Failure reported by a session or execution collaborator.
    Remote,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in CLI output and test vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::SchemaViolation => "SCHEMA_VIOLATION",
            ErrorCode::EncodingError => "ENCODING_ERROR",
            ErrorCode::DecodingError => "DECODING_ERROR",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnknownAction => "UNKNOWN_ACTION",
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::Remote => "REMOTE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, SpendGateError>;

/// Unified error type used by core and agent.
#[derive(Debug, Error)]
pub enum SpendGateError {
    #[error("schema violation: {field}: {reason}")]
    SchemaViolation { field: String, reason: String },
    #[error("encoding error: {0}")]
    Encoding(String),
    #[error("decoding error: {0}")]
    Decoding(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Remote(Box<dyn std::error::Error + Send + Sync>),
    #[error("internal: {0}")]
    Internal(String),
}

impl SpendGateError {
    pub(crate) fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SpendGateError::SchemaViolation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a collaborator failure without altering its message or source chain.
    pub fn remote<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        SpendGateError::Remote(err.into())
    }

    /// Map internal error to a stable caller-facing code.
    pub fn code(&self) -> ErrorCode {
        match self {
            SpendGateError::SchemaViolation { .. } => ErrorCode::SchemaViolation,
            SpendGateError::Encoding(_) => ErrorCode::EncodingError,
            SpendGateError::Decoding(_) => ErrorCode::DecodingError,
            SpendGateError::BadConfig(_) => ErrorCode::BadConfig,
            SpendGateError::UnknownAction(_) => ErrorCode::UnknownAction,
            SpendGateError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            SpendGateError::Remote(_) => ErrorCode::Remote,
            SpendGateError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Offending field for schema violations.
    pub fn field(&self) -> Option<&str> {
        match self {
            SpendGateError::SchemaViolation { field, .. } => Some(field),
            _ => None,
        }
    }
}
