/// The top-level segment of a media type, lowercased: `"image/jpeg"` →
/// `"image"`. This is the base tag every file receives.
#[must_use]
pub fn category(media_type: &str) -> String {
    media_type.split('/').next().unwrap_or_default().trim().to_ascii_lowercase()
}

/// Whether the declared media type is an image.
#[must_use]
pub fn is_image(media_type: &str) -> bool {
    category(media_type) == "image" && media_type.contains('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("image/jpeg", "image", true)]
    #[case("Image/PNG", "image", true)]
    #[case("video/mp4", "video", false)]
    #[case("audio/mpeg", "audio", false)]
    #[case("application/pdf", "application", false)]
    #[case("image", "image", false)]
    #[case("", "", false)]
    fn test_category(#[case] media_type: &str, #[case] expected: &str, #[case] image: bool) {
        assert_eq!(category(media_type), expected);
        assert_eq!(is_image(media_type), image);
    }
}
