//! Best-effort image metadata extraction and tag synthesis.
//!
//! Two halves, both free of I/O:
//!
//! - [`extract`] parses the small set of EXIF fields we care about (capture
//!   time, GPS position, camera make/model, description) out of raw image
//!   bytes. It never fails: missing or corrupt metadata yields an empty
//!   [`ImageMetadata`] and a debug-level diagnostic. Use [`try_extract`] when
//!   the reason matters.
//! - [`synthesize`] turns a media category plus extracted metadata into a
//!   [`TagSet`] of lowercase tokens (time of day, weekday, season, camera).
//!
//! Location tags need a network lookup and are deliberately not produced
//! here; see the `tagpress-geo` crate.

pub mod error;
mod fields;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
mod media;
pub mod models;
mod synthesize;

use std::io::Cursor;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
pub use crate::media::{category, is_image};
use crate::models::ImageMetadata;
pub use crate::models::TagSet;
pub use crate::synthesize::{Season, TimeOfDay, synthesize};

/// Extract metadata from raw image bytes, swallowing every failure.
///
/// Absence of metadata is the normal case for screenshots, edited exports and
/// most PNGs, so failures are only logged at debug level.
#[instrument(skip(bytes), fields(size = bytes.len()))]
pub fn extract(bytes: &[u8]) -> ImageMetadata {
    match try_extract(bytes) {
        Ok(metadata) => metadata,
        Err(err) => {
            tracing::debug!(error = ?err, "No usable image metadata");
            ImageMetadata::default()
        },
    }
}

/// Like [`extract`], but gated on the declared media type: anything that is
/// not an `image/*` short-circuits to empty metadata without parsing.
pub fn extract_for(media_type: &str, bytes: &[u8]) -> ImageMetadata {
    if is_image(media_type) { extract(bytes) } else { ImageMetadata::default() }
}

/// Extract metadata from raw image bytes.
///
/// Tolerates partially corrupt EXIF blocks: whatever fields could be read are
/// kept. Fails only when there is no EXIF block at all, or when it is too
/// broken to yield anything.
pub fn try_extract(bytes: &[u8]) -> Result<ImageMetadata> {
    let exif = ::exif::Reader::new()
        .continue_on_error(true)
        .read_from_container(&mut Cursor::new(bytes))
        .or_else(|err| {
            err.distill_partial_result(|errors| {
                for error in errors {
                    tracing::debug!(%error, "Skipping unreadable EXIF field");
                }
            })
        });
    let exif = match exif {
        Ok(exif) => exif,
        Err(::exif::Error::NotFound(_)) => exn::bail!(ErrorKind::NoMetadata),
        Err(err) => exn::bail!(ErrorKind::Malformed(err.to_string())),
    };
    let metadata = crate::fields::metadata(&exif);
    if metadata.is_empty() {
        // An EXIF block with none of the fields we look for.
        exn::bail!(ErrorKind::NoMetadata);
    }
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{ExifBuilder, MINIMAL_JPEG};

    #[test]
    fn test_extract_without_exif_is_empty() {
        assert!(extract(MINIMAL_JPEG).is_empty());
        assert_eq!(*try_extract(MINIMAL_JPEG).unwrap_err(), ErrorKind::NoMetadata);
    }

    #[test]
    fn test_extract_garbage_is_empty() {
        assert!(extract(b"not an image at all").is_empty());
        assert!(extract(&[]).is_empty());
    }

    #[test]
    fn test_extract_for_skips_non_images() {
        let jpeg = ExifBuilder::new().make("Canon").embed_in_jpeg(MINIMAL_JPEG);
        assert!(extract_for("application/pdf", &jpeg).is_empty());
        assert!(!extract_for("image/jpeg", &jpeg).is_empty());
    }

    #[test]
    fn test_extract_from_tiff() {
        let tiff = ExifBuilder::new().make("NIKON CORPORATION").model("NIKON D750").tiff();
        let camera = extract(&tiff).camera.unwrap();
        assert_eq!(camera.make.as_deref(), Some("NIKON CORPORATION"));
        assert_eq!(camera.model.as_deref(), Some("NIKON D750"));
    }

    #[test]
    fn test_exif_block_without_interesting_fields() {
        let jpeg = ExifBuilder::new().software("GIMP 2.10").embed_in_jpeg(MINIMAL_JPEG);
        assert!(extract(&jpeg).is_empty());
    }
}
