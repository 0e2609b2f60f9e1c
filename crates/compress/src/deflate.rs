//! Whole-buffer DEFLATE.
//!
//! Output is a zlib-wrapped DEFLATE stream. The wrapper is the only framing:
//! the declared media type is not recorded, so the output is meaningless
//! without it.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use flate2::{Compression as Level, read::ZlibDecoder, write::ZlibEncoder};
use std::io::{Read, Write};
use tracing::instrument;

/// Deflate `input` at `level` (clamped to `0..=9`).
///
/// Lossless. Incompressible input (already-compressed media, encrypted
/// documents) may come out slightly larger; that is accepted.
pub(crate) fn deflate(input: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(input.len() / 2), Level::new(level.min(9)));
    encoder.write_all(input).or_raise(|| ErrorKind::Io)?;
    encoder.finish().or_raise(|| ErrorKind::Io)
}

/// Reverse [`Strategy::Deflate`](crate::Strategy::Deflate), recovering the
/// original bytes.
///
/// # Examples
///
/// ```
/// use tagpress_compress::{Options, Strategy, inflate};
///
/// let compressed = Strategy::Deflate.compress(b"%PDF-1.7", "application/pdf", &Options::default()).unwrap();
/// assert_eq!(inflate(&compressed).unwrap(), b"%PDF-1.7");
/// ```
#[instrument(skip(input), fields(input_size = input.len(), output_size))]
pub fn inflate(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    ZlibDecoder::new(input).read_to_end(&mut output).or_raise(|| ErrorKind::Io)?;
    tracing::Span::current().record("output_size", output.len());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(7)]
    #[case(9)]
    // Out of range levels are clamped rather than rejected.
    #[case(42)]
    fn test_levels(#[case] level: u32) {
        let original = b"The quick brown fox jumps over the lazy dog.".repeat(10);
        let compressed = deflate(&original, level).unwrap();
        assert_eq!(inflate(&compressed).unwrap(), original);
    }

    #[test]
    fn test_zlib_header() {
        let compressed = deflate(b"hello", 7).unwrap();
        // CMF byte: deflate with a 32K window.
        assert_eq!(compressed[0], 0x78);
    }

    #[test]
    fn test_empty_input() {
        let compressed = deflate(b"", 7).unwrap();
        assert!(!compressed.is_empty());
        assert!(inflate(&compressed).unwrap().is_empty());
    }

    #[test]
    fn test_inflate_invalid() {
        assert!(inflate(b"This is not compressed data").is_err());
    }
}
