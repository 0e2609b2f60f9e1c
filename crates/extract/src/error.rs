//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! These only surface from [`try_extract`](crate::try_extract);
//! [`extract`](crate::extract) absorbs them.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why no metadata could be extracted.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The image carries no EXIF block, or none of the fields we read.
    #[display("no metadata")]
    NoMetadata,
    /// The container or EXIF block is too broken to read.
    #[display("malformed metadata: {_0}")]
    Malformed(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Same bytes, same result.
        false
    }
}
