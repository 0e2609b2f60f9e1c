//! Readers for the individual EXIF fields we care about.

use crate::models::{Camera, ImageMetadata, Location};
use exif::{DateTime as ExifDateTime, Exif, In, Tag, Value};
use time::{Date, Month, PrimitiveDateTime, Time};
use tracing::instrument;

#[instrument(level = "trace", skip(exif))]
pub(crate) fn metadata(exif: &Exif) -> ImageMetadata {
    ImageMetadata {
        capture_time: capture_time(exif),
        location: location(exif),
        camera: camera(exif),
        description: string(exif, Tag::ImageDescription),
    }
}

/// Capture time, preferring when the shutter fired over when it was digitized.
fn capture_time(exif: &Exif) -> Option<PrimitiveDateTime> {
    [Tag::DateTimeOriginal, Tag::DateTimeDigitized].into_iter().find_map(|tag| datetime(exif, tag))
}

fn datetime(exif: &Exif, tag: Tag) -> Option<PrimitiveDateTime> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let Value::Ascii(ref values) = field.value else {
        return None;
    };
    let parsed = ExifDateTime::from_ascii(values.first()?).ok()?;
    let date = Date::from_calendar_date(i32::from(parsed.year), Month::try_from(parsed.month).ok()?, parsed.day).ok()?;
    let time = Time::from_hms(parsed.hour, parsed.minute, parsed.second).ok()?;
    Some(PrimitiveDateTime::new(date, time))
}

fn location(exif: &Exif) -> Option<Location> {
    let location = Location {
        latitude: coordinate(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef, b'S'),
        longitude: coordinate(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef, b'W'),
        altitude: altitude(exif),
    };
    (location != Location::default()).then_some(location)
}

/// Decimal degrees from a degrees/minutes/seconds rational triple, negated
/// when the reference field names the `negative` hemisphere.
fn coordinate(exif: &Exif, tag: Tag, reference: Tag, negative: u8) -> Option<f64> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let Value::Rational(ref parts) = field.value else {
        return None;
    };
    let degrees = match parts.as_slice() {
        [degrees, minutes, seconds, ..] => degrees.to_f64() + minutes.to_f64() / 60.0 + seconds.to_f64() / 3600.0,
        [degrees] => degrees.to_f64(),
        _ => return None,
    };
    let is_negative = exif.get_field(reference, In::PRIMARY).is_some_and(|field| match &field.value {
        Value::Ascii(values) => {
            values.first().and_then(|v| v.first()).is_some_and(|c| c.eq_ignore_ascii_case(&negative))
        },
        _ => false,
    });
    let degrees = if is_negative { -degrees } else { degrees };
    degrees.is_finite().then_some(degrees)
}

fn altitude(exif: &Exif) -> Option<f64> {
    let field = exif.get_field(Tag::GPSAltitude, In::PRIMARY)?;
    let Value::Rational(ref parts) = field.value else {
        return None;
    };
    let metres = parts.first()?.to_f64();
    // Reference 1 means below sea level.
    let below = exif
        .get_field(Tag::GPSAltitudeRef, In::PRIMARY)
        .is_some_and(|field| matches!(&field.value, Value::Byte(v) if v.first() == Some(&1)));
    let metres = if below { -metres } else { metres };
    metres.is_finite().then_some(metres)
}

fn camera(exif: &Exif) -> Option<Camera> {
    let camera = Camera {
        make: string(exif, Tag::Make),
        model: string(exif, Tag::Model),
    };
    (camera != Camera::default()).then_some(camera)
}

/// First non-blank ASCII component of a field, with NUL padding and
/// surrounding whitespace removed.
fn string(exif: &Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let Value::Ascii(ref values) = field.value else {
        return None;
    };
    values
        .iter()
        .map(|v| String::from_utf8_lossy(v).trim_matches(|c: char| c == '\0' || c.is_whitespace()).to_string())
        .find(|s| !s.is_empty())
}
