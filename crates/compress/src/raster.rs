//! Raster image re-encoding.
//!
//! | Step | How |
//! |---|---|
//! | Decode | `image::ImageReader`, format sniffed from the bytes |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3`, only when too large |
//! | Encode | declared format; JPEG at the configured quality, others lossless |

use crate::Options;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use tracing::instrument;

#[instrument(level = "debug", skip(input, options), fields(width, height, format))]
pub(crate) fn recode(input: &[u8], media_type: &str, options: &Options) -> Result<Vec<u8>> {
    let declared = ImageFormat::from_mime_type(media_type.trim().to_ascii_lowercase());
    let mut reader = ImageReader::new(Cursor::new(input)).with_guessed_format().or_raise(|| ErrorKind::Decode)?;
    let sniffed = reader.format();
    if sniffed.is_none()
        && let Some(declared) = declared
    {
        reader.set_format(declared);
    }
    let format = output_format(declared, sniffed, media_type)?;
    let image = reader.decode().or_raise(|| ErrorKind::Decode)?;

    let image = match fit_within(image.width(), image.height(), options.max_dimension) {
        Some((width, height)) => {
            tracing::debug!(from_width = image.width(), from_height = image.height(), width, height, "Downscaling");
            image.resize_exact(width, height, FilterType::Lanczos3)
        },
        None => image,
    };
    let span = tracing::Span::current();
    span.record("width", image.width());
    span.record("height", image.height());
    span.record("format", tracing::field::debug(format));

    encode(&image, format, options.quality)
}

/// The declared format wins when we can write it; otherwise fall back to
/// whatever the bytes turned out to be.
fn output_format(declared: Option<ImageFormat>, sniffed: Option<ImageFormat>, media_type: &str) -> Result<ImageFormat> {
    declared
        .filter(ImageFormat::writing_enabled)
        .or(sniffed.filter(ImageFormat::writing_enabled))
        .ok_or_else(|| match sniffed.or(declared) {
            // Something we recognise but cannot write.
            Some(_) => exn::Exn::from(ErrorKind::UnsupportedFormat(media_type.to_string())),
            // Nothing recognised the bytes at all.
            None => exn::Exn::from(ErrorKind::Decode),
        })
}

/// Target dimensions when either side exceeds `max`, scaling both sides by
/// the same factor. `None` when the image already fits.
fn fit_within(width: u32, height: u32, max: u32) -> Option<(u32, u32)> {
    if width <= max && height <= max {
        return None;
    }
    let max_f = f64::from(max);
    let scale = (max_f / f64::from(width)).min(max_f / f64::from(height));
    // Casts are bounded: both results are clamped to [1, max].
    let scaled = |side: u32| ((f64::from(side) * scale).round() as u32).clamp(1, max);
    Some((scaled(width), scaled(height)))
}

fn encode(image: &DynamicImage, format: ImageFormat, quality: f32) -> Result<Vec<u8>> {
    let mut output = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel and no 16-bit mode.
            let encoder = JpegEncoder::new_with_quality(&mut output, jpeg_quality(quality));
            DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder).or_raise(|| ErrorKind::Encode)?;
        },
        other => image.write_to(&mut output, other).or_raise(|| ErrorKind::Encode)?,
    }
    Ok(output.into_inner())
}

fn jpeg_quality(quality: f32) -> u8 {
    // Bounded to 1..=100 before the cast.
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}
