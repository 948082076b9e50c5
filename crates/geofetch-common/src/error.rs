//! Error types for geofetch.

use thiserror::Error;

/// Result type alias for geofetch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for geofetch.
#[derive(Error, Debug)]
pub enum Error {
    /// Request failures (network, timeout, non-success status)
    #[error("fetch error for {context}: {message}")]
    Fetch { context: String, message: String },

    /// Response bodies that are not valid JSON or lack expected keys
    #[error("parse error for {context}: {message}")]
    Parse { context: String, message: String },

    /// Output-target create/append failures
    #[error("conversion error: {0}")]
    Conversion(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Fetch error naming the object-ID range of the failed request.
    pub fn fetch_range(begin: i64, end: i64, message: impl Into<String>) -> Self {
        Error::Fetch {
            context: format!("OID range {} to {}", begin, end),
            message: message.into(),
        }
    }
}
