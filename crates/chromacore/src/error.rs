//! Error types for chromacore

use thiserror::Error;

use crate::icc::IccError;

/// Result type for chromacore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in chromacore operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Caller contract violation (absent profile, malformed kernel, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Failed to decode an ICC profile
    #[error("Profile parse error: {0}")]
    ProfileParse(#[from] IccError),

    /// A bounded worker pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
