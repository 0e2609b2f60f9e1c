//! Geocoding Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! These only surface from [`ReverseGeocoder::lookup`](crate::ReverseGeocoder::lookup);
//! [`resolve`](crate::ReverseGeocoder::resolve) absorbs them.

use derive_more::{Display, Error};

/// A geocoding error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for geocoding operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection, TLS or timeout failure; no response was received.
    #[display("geocoding request failed")]
    Network,
    /// The service answered with a non-success status.
    #[display("geocoding service responded with status {_0}")]
    Status(#[error(not(source))] u16),
    /// The response was not the JSON document we expected.
    #[display("invalid geocoding response")]
    InvalidBody,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    ///
    /// Nothing in this crate retries; this is informational for callers that
    /// wish to.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network => true,
            Self::Status(status) => *status == 429 || *status >= 500,
            Self::InvalidBody => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorKind::Network, true)]
    #[case(ErrorKind::Status(429), true)]
    #[case(ErrorKind::Status(503), true)]
    #[case(ErrorKind::Status(404), false)]
    #[case(ErrorKind::InvalidBody, false)]
    fn test_is_retryable(#[case] kind: ErrorKind, #[case] expected: bool) {
        assert_eq!(kind.is_retryable(), expected);
    }
}
