//! Compression Operations

use crate::error::Result;
use crate::{Strategy, archive, deflate, raster};
use tracing::instrument;

/// Tuning shared by every strategy.
///
/// The defaults are the values the pipeline is specified with; they only
/// change when a deployment overrides them in its configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Options {
    /// Images wider or taller than this are scaled down to fit.
    pub max_dimension: u32,
    /// Quality factor for lossy re-encoding, in `(0, 1]`.
    pub quality: f32,
    /// DEFLATE level, `0..=9`.
    pub level: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_dimension: 2048,
            quality: 0.7,
            level: 7,
        }
    }
}

impl Strategy {
    /// Compress a byte buffer in memory.
    ///
    /// `media_type` is the declared type of the input. Raster uses it to pick
    /// the output encoder; the other strategies ignore it, but the caller must
    /// keep it alongside the output to make sense of the bytes later.
    ///
    /// This is CPU-bound and may take a while for large images or buffers;
    /// async callers should run it on a blocking thread.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagpress_compress::{Options, Strategy, inflate};
    ///
    /// let data = b"Hello, world! Hello, world! Hello, world!";
    /// let compressed = Strategy::Deflate.compress(data, "application/pdf", &Options::default()).unwrap();
    /// assert_eq!(inflate(&compressed).unwrap(), data);
    /// ```
    #[instrument(skip(input, options), fields(
        strategy = %self,
        input_size = input.len(),
        output_size
    ))]
    pub fn compress(&self, input: &[u8], media_type: &str, options: &Options) -> Result<Vec<u8>> {
        let output = match self {
            Strategy::Raster => raster::recode(input, media_type, options)?,
            Strategy::Archive => archive::repack(input, options.level)?,
            Strategy::Deflate => deflate::deflate(input, options.level)?,
        };
        tracing::Span::current().record("output_size", output.len());
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::{Options, Strategy, inflate};

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.max_dimension, 2048);
        assert_eq!(options.quality, 0.7);
        assert_eq!(options.level, 7);
    }

    #[test]
    fn test_deflate_roundtrip() {
        let original = b"Hello, world! This is a test of some compression.".repeat(20);
        let compressed = Strategy::Deflate.compress(&original, "application/pdf", &Options::default()).unwrap();
        assert!(compressed.len() < original.len());
        assert_eq!(inflate(&compressed).unwrap(), original);
    }

    #[test]
    fn test_deflate_accepts_already_deflated_input() {
        let options = Options::default();
        let once = Strategy::Deflate.compress(b"some document bytes", "application/pdf", &options).unwrap();
        let twice = Strategy::Deflate.compress(&once, "application/pdf", &options).unwrap();
        // Not guaranteed to shrink, but must not corrupt.
        assert_eq!(inflate(&twice).unwrap(), once);
    }

    #[test]
    fn test_raster_rejects_garbage() {
        let err = Strategy::Raster.compress(b"definitely not an image", "image/jpeg", &Options::default()).unwrap_err();
        assert_eq!(*err, ErrorKind::Decode);
    }

    #[test]
    fn test_archive_rejects_garbage() {
        let err = Strategy::Archive.compress(b"PK but not really", "application/zip", &Options::default()).unwrap_err();
        assert_eq!(*err, ErrorKind::Archive);
    }
}
