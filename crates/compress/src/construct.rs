use crate::Strategy;

impl Strategy {
    /// Choose the strategy for a declared media type.
    ///
    /// First match wins:
    /// 1. `image/*` → [`Raster`](Strategy::Raster)
    /// 2. anything containing `zip` → [`Archive`](Strategy::Archive)
    /// 3. everything else → [`Deflate`](Strategy::Deflate)
    ///
    /// Media types are compared case-insensitively.
    #[must_use]
    pub fn for_media_type(media_type: &str) -> Self {
        let media_type = media_type.trim().to_ascii_lowercase();
        if media_type.starts_with("image/") {
            Strategy::Raster
        } else if media_type.contains("zip") {
            Strategy::Archive
        } else {
            Strategy::Deflate
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Strategy;
    use rstest::rstest;

    #[rstest]
    #[case("image/jpeg", Strategy::Raster)]
    #[case("image/png", Strategy::Raster)]
    #[case("IMAGE/PNG", Strategy::Raster)]
    // An image type that happens to contain "zip" is still an image.
    #[case("image/x-zip-preview", Strategy::Raster)]
    #[case("application/zip", Strategy::Archive)]
    #[case("application/x-zip-compressed", Strategy::Archive)]
    #[case("application/pdf", Strategy::Deflate)]
    #[case("application/vnd.openxmlformats-officedocument.wordprocessingml.document", Strategy::Deflate)]
    #[case("video/mp4", Strategy::Deflate)]
    #[case("audio/mpeg", Strategy::Deflate)]
    #[case("", Strategy::Deflate)]
    fn test_for_media_type(#[case] media_type: &str, #[case] expected: Strategy) {
        assert_eq!(Strategy::for_media_type(media_type), expected);
        assert_eq!(<&str as Into<Strategy>>::into(media_type), expected);
    }
}
