//! Error types for the SysRef client.
//!
//! This module defines the centralized error type [`SysrefError`] and a type alias
//! [`Result`] for convenient error handling throughout the client. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Catalog failures never escape an operation boundary as faults. The event
//! handler converts them into notifications or inline placeholders, using
//! [`SysrefError::kind`] to pick the wording.

use thiserror::Error;

/// The main error type for SysRef client operations.
///
/// Consolidates transport, decoding, clipboard, configuration and terminal
/// failures. `Io` wraps standard library errors via `#[from]`.
///
/// # Examples
///
/// ```
/// use sysref::domain::{FailureKind, SysrefError};
///
/// let err = SysrefError::Status(500);
/// assert_eq!(err.kind(), FailureKind::Network);
///
/// let err = SysrefError::Parse("expected a list".to_string());
/// assert_eq!(err.kind(), FailureKind::Parse);
/// ```
#[derive(Debug, Error)]
pub enum SysrefError {
    /// The request never produced a response (connection refused, timeout, DNS).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status code.
    #[error("Server returned status {0}")]
    Status(u16),

    /// The response body was not the expected JSON shape.
    #[error("Malformed response: {0}")]
    Parse(String),

    /// The requested entry does not exist.
    #[error("Entry {0} not found")]
    NotFound(i64),

    /// The system clipboard refused the write.
    #[error("Clipboard unavailable: {0}")]
    Permission(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the catalog worker pool failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Terminal setup or teardown failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a failure, used for user-facing wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Fetch rejected, timed out, or returned a non-OK status.
    Network,
    /// Response was not well-formed.
    Parse,
    /// A local capability (clipboard) was denied.
    Permission,
    /// Anything local to the client (config, terminal, IO).
    Local,
}

impl SysrefError {
    /// Classifies the error into the client's failure taxonomy.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Network(_) | Self::Status(_) | Self::NotFound(_) => FailureKind::Network,
            Self::Parse(_) => FailureKind::Parse,
            Self::Permission(_) => FailureKind::Permission,
            Self::Config(_) | Self::Theme(_) | Self::Worker(_) | Self::Terminal(_) | Self::Io(_) => {
                FailureKind::Local
            }
        }
    }
}

impl From<reqwest::Error> for SysrefError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SysrefError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// A specialized `Result` type for SysRef operations.
pub type Result<T> = std::result::Result<T, SysrefError>;
