//! In-memory EXIF fixtures for tests.
//!
//! Available to this crate's tests, and to other crates through the
//! `fixtures` feature. Everything here panics on failure; if test setup is
//! wrong, then the test should not pass.

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use std::io::Cursor;

/// The smallest byte sequence the EXIF reader accepts as a JPEG: start of
/// image immediately followed by end of image.
pub const MINIMAL_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xD9];

const SOI: [u8; 2] = [0xFF, 0xD8];
const APP1: [u8; 2] = [0xFF, 0xE1];
const EXIF_HEADER: &[u8; 6] = b"Exif\0\0";

/// Builds an EXIF block field by field.
#[derive(Default)]
pub struct ExifBuilder {
    fields: Vec<Field>,
}

impl ExifBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make(self, make: &str) -> Self {
        self.ascii(Tag::Make, make)
    }

    pub fn model(self, model: &str) -> Self {
        self.ascii(Tag::Model, model)
    }

    pub fn software(self, software: &str) -> Self {
        self.ascii(Tag::Software, software)
    }

    pub fn description(self, description: &str) -> Self {
        self.ascii(Tag::ImageDescription, description)
    }

    /// `DateTimeOriginal`, in EXIF's `YYYY:MM:DD HH:MM:SS` format.
    pub fn captured(self, datetime: &str) -> Self {
        self.ascii(Tag::DateTimeOriginal, datetime)
    }

    /// `DateTimeDigitized`, in EXIF's `YYYY:MM:DD HH:MM:SS` format.
    pub fn digitized(self, datetime: &str) -> Self {
        self.ascii(Tag::DateTimeDigitized, datetime)
    }

    /// GPS position in signed decimal degrees.
    pub fn gps(self, latitude: f64, longitude: f64) -> Self {
        self.ascii(Tag::GPSLatitudeRef, if latitude < 0.0 { "S" } else { "N" })
            .field(Tag::GPSLatitude, Value::Rational(dms(latitude.abs())))
            .ascii(Tag::GPSLongitudeRef, if longitude < 0.0 { "W" } else { "E" })
            .field(Tag::GPSLongitude, Value::Rational(dms(longitude.abs())))
    }

    /// GPS altitude in signed metres.
    pub fn altitude(self, metres: f64) -> Self {
        self.field(Tag::GPSAltitudeRef, Value::Byte(vec![u8::from(metres < 0.0)]))
            .field(Tag::GPSAltitude, Value::Rational(vec![rational(metres.abs())]))
    }

    fn ascii(self, tag: Tag, value: &str) -> Self {
        self.field(tag, Value::Ascii(vec![value.as_bytes().to_vec()]))
    }

    fn field(mut self, tag: Tag, value: Value) -> Self {
        self.fields.push(Field {
            tag,
            ifd_num: In::PRIMARY,
            value,
        });
        self
    }

    /// The EXIF block as a standalone (big-endian) TIFF file.
    pub fn tiff(&self) -> Vec<u8> {
        let mut writer = Writer::new();
        for field in &self.fields {
            writer.push_field(field);
        }
        let mut buffer = Cursor::new(Vec::new());
        writer.write(&mut buffer, false).expect("fixture EXIF fields to be writable");
        buffer.into_inner()
    }

    /// Insert the EXIF block as an APP1 segment straight after the start of
    /// image marker of `jpeg`.
    pub fn embed_in_jpeg(&self, jpeg: &[u8]) -> Vec<u8> {
        assert!(jpeg.starts_with(&SOI), "fixture input is not a JPEG");
        let tiff = self.tiff();
        let length = u16::try_from(2 + EXIF_HEADER.len() + tiff.len()).expect("fixture EXIF block to fit a segment");
        let mut output = Vec::with_capacity(jpeg.len() + usize::from(length) + 2);
        output.extend_from_slice(&SOI);
        output.extend_from_slice(&APP1);
        output.extend_from_slice(&length.to_be_bytes());
        output.extend_from_slice(EXIF_HEADER);
        output.extend_from_slice(&tiff);
        output.extend_from_slice(&jpeg[SOI.len()..]);
        output
    }
}

fn dms(degrees: f64) -> Vec<Rational> {
    let whole = degrees.trunc();
    let minutes = (degrees - whole) * 60.0;
    let seconds = (minutes - minutes.trunc()) * 60.0;
    vec![rational(whole), rational(minutes.trunc()), rational(seconds)]
}

fn rational(value: f64) -> Rational {
    const DENOMINATOR: u32 = 1_000_000;
    Rational {
        num: (value * f64::from(DENOMINATOR)).round() as u32,
        denom: DENOMINATOR,
    }
}
