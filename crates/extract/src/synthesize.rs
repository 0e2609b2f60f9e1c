use crate::models::{ImageMetadata, TagSet};
use derive_more::Display;
use time::{Month, PrimitiveDateTime};

/// Coarse local-hour bucket of a capture time.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    #[display("morning")]
    Morning,
    #[display("afternoon")]
    Afternoon,
    #[display("evening")]
    Evening,
    #[display("night")]
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u8) -> Self {
        match hour {
            5..12 => Self::Morning,
            12..17 => Self::Afternoon,
            17..20 => Self::Evening,
            _ => Self::Night,
        }
    }
}

/// Calendar season, by month alone. Northern-hemisphere naming is applied
/// everywhere, regardless of where the photo was taken.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    #[display("spring")]
    Spring,
    #[display("summer")]
    Summer,
    #[display("autumn")]
    Autumn,
    #[display("winter")]
    Winter,
}

impl From<Month> for Season {
    fn from(month: Month) -> Self {
        match month {
            Month::March | Month::April | Month::May => Self::Spring,
            Month::June | Month::July | Month::August => Self::Summer,
            Month::September | Month::October | Month::November => Self::Autumn,
            Month::December | Month::January | Month::February => Self::Winter,
        }
    }
}

/// Tags derivable from metadata without any I/O.
///
/// Always contains `category`. A capture time contributes exactly one
/// time-of-day, one weekday and one season tag; camera make and model are
/// added as-is (lowercased). Pure: identical inputs give identical sets.
pub fn synthesize(category: &str, metadata: &ImageMetadata) -> TagSet {
    let mut tags = TagSet::new();
    tags.insert(category);
    if let Some(captured) = metadata.capture_time {
        tags.extend(time_tags(captured));
    }
    if let Some(camera) = &metadata.camera {
        tags.extend(camera.make.iter().chain(camera.model.iter()));
    }
    tags
}

fn time_tags(captured: PrimitiveDateTime) -> [String; 3] {
    [
        TimeOfDay::from_hour(captured.hour()).to_string(),
        captured.weekday().to_string(),
        Season::from(captured.month()).to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Camera;
    use rstest::rstest;
    use time::macros::datetime;

    #[rstest]
    #[case(0, TimeOfDay::Night)]
    #[case(4, TimeOfDay::Night)]
    #[case(5, TimeOfDay::Morning)]
    #[case(11, TimeOfDay::Morning)]
    #[case(12, TimeOfDay::Afternoon)]
    #[case(16, TimeOfDay::Afternoon)]
    #[case(17, TimeOfDay::Evening)]
    #[case(19, TimeOfDay::Evening)]
    #[case(20, TimeOfDay::Night)]
    #[case(23, TimeOfDay::Night)]
    fn test_time_of_day(#[case] hour: u8, #[case] expected: TimeOfDay) {
        assert_eq!(TimeOfDay::from_hour(hour), expected);
    }

    #[rstest]
    #[case(Month::February, Season::Winter)]
    #[case(Month::March, Season::Spring)]
    #[case(Month::May, Season::Spring)]
    #[case(Month::June, Season::Summer)]
    #[case(Month::August, Season::Summer)]
    #[case(Month::September, Season::Autumn)]
    #[case(Month::November, Season::Autumn)]
    #[case(Month::December, Season::Winter)]
    fn test_season(#[case] month: Month, #[case] expected: Season) {
        assert_eq!(Season::from(month), expected);
    }

    #[test]
    fn test_canon_summer_afternoon() {
        let metadata = ImageMetadata {
            capture_time: Some(datetime!(2024-06-15 14:30:00)),
            camera: Some(Camera {
                make: Some("Canon".to_string()),
                model: Some("Canon EOS R5".to_string()),
            }),
            ..ImageMetadata::default()
        };
        let tags = synthesize("image", &metadata);
        assert_eq!(tags.into_vec(), vec!["afternoon", "canon", "canon eos r5", "image", "saturday", "summer"]);
    }

    #[test]
    fn test_category_only_without_metadata() {
        let tags = synthesize("application", &ImageMetadata::default());
        assert_eq!(tags.into_vec(), vec!["application"]);
    }

    #[test]
    fn test_is_deterministic() {
        let metadata = ImageMetadata {
            capture_time: Some(datetime!(2023-12-24 21:05:09)),
            ..ImageMetadata::default()
        };
        let first = synthesize("image", &metadata);
        assert_eq!(first, synthesize("image", &metadata));
        assert_eq!(first.into_vec(), vec!["image", "night", "sunday", "winter"]);
    }
}
