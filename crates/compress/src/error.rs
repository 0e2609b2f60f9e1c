//! Compression Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A compression error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for compression operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
/// None of them are worth retrying: the strategies are deterministic, so the
/// same bytes will fail the same way again.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The image bytes could not be decoded.
    #[display("failed to decode image")]
    Decode,
    /// The zip-family container could not be parsed or one of its entries
    /// could not be read.
    #[display("unreadable archive")]
    Archive,
    /// The declared media type has no encoder and the bytes could not be
    /// sniffed either.
    #[display("unsupported format: {_0}")]
    UnsupportedFormat(#[error(not(source))] String),
    /// Re-encoding the decoded image failed.
    #[display("failed to encode image")]
    Encode,
    /// Writing the compressed output failed.
    #[display("I/O error")]
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
