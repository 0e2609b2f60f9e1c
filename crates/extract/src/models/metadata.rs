use time::PrimitiveDateTime;

/// Descriptive metadata embedded in an image.
///
/// Every field is independently optional; EXIF data in the wild is partial
/// more often than not. The default value is "nothing found".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageMetadata {
    /// When the photo was taken (`DateTimeOriginal`, else `DateTimeDigitized`).
    /// EXIF carries no zone, so this is the camera's local wall-clock time.
    pub capture_time: Option<PrimitiveDateTime>,
    /// GPS position
    pub location: Option<Location>,
    /// Camera make and model
    pub camera: Option<Camera>,
    /// Free-text description (`ImageDescription`)
    pub description: Option<String>,
}

impl ImageMetadata {
    /// `true` when nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.capture_time.is_none() && self.location.is_none() && self.camera.is_none() && self.description.is_none()
    }

    /// Coordinates worth reverse-geocoding, if any. See [`Location::coordinates`].
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.location.as_ref().and_then(Location::coordinates)
    }
}

/// GPS position in decimal degrees (negative for south/west) and metres
/// (negative below sea level).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Location {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
}

impl Location {
    /// `(latitude, longitude)` when both are present, finite and non-zero.
    ///
    /// Exactly zero is treated as absent: cameras without a fix commonly
    /// write zeroed GPS fields rather than omitting them.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let usable = |value: f64| value.is_finite() && value != 0.0;
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) if usable(latitude) && usable(longitude) => Some((latitude, longitude)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Camera {
    pub make: Option<String>,
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(48.8566), Some(2.3522), Some((48.8566, 2.3522)))]
    #[case(Some(-33.8688), Some(151.2093), Some((-33.8688, 151.2093)))]
    #[case(Some(48.8566), None, None)]
    #[case(None, Some(2.3522), None)]
    #[case(Some(0.0), Some(2.3522), None)]
    #[case(Some(48.8566), Some(0.0), None)]
    #[case(Some(f64::NAN), Some(2.3522), None)]
    #[case(Some(48.8566), Some(f64::INFINITY), None)]
    fn test_coordinates(
        #[case] latitude: Option<f64>,
        #[case] longitude: Option<f64>,
        #[case] expected: Option<(f64, f64)>,
    ) {
        let location = Location {
            latitude,
            longitude,
            altitude: Some(35.0),
        };
        assert_eq!(location.coordinates(), expected);
    }

    #[test]
    fn test_default_is_empty() {
        let metadata = ImageMetadata::default();
        assert!(metadata.is_empty());
        assert_eq!(metadata.coordinates(), None);
    }

    #[test]
    fn test_description_alone_is_not_empty() {
        let metadata = ImageMetadata {
            description: Some("Sunset".to_string()),
            ..ImageMetadata::default()
        };
        assert!(!metadata.is_empty());
    }
}
