//! Pipeline Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! An [`Error`] is never returned from the batch entry points; it is the
//! failure half of a single file's [`PipelineResult`](crate::PipelineResult).
//! The displayed kind is the human-readable reason shown to the user.

use derive_more::{Display, Error};
use tagpress_compress::error::{Error as CompressionError, ErrorKind as CompressionErrorKind};

/// A per-file pipeline failure with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for per-file pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a file produced no output.
///
/// Only terminal conditions appear here. Missing metadata and failed
/// geocoding are not errors; they just mean fewer tags.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file was turned away by validation; carries the reason.
    #[display("{_0}")]
    Rejected(#[error(not(source))] String),
    /// The compression strategy could not process the bytes.
    #[display("{_0}")]
    Compression(CompressionErrorKind),
    /// The worker processing this file panicked or was cancelled.
    #[display("processing was interrupted")]
    Task,
}

impl ErrorKind {
    /// Convert a compression error into a pipeline error, preserving the
    /// compress crate's `Exn` frame (error tree) as a child in its own
    /// error tree.
    #[track_caller]
    pub fn compression(err: CompressionError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Compression(inner))
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Compression(kind) => kind.is_retryable(),
            Self::Rejected(_) => false,
            Self::Task => true,
        }
    }
}
