use crate::error::{ErrorKind, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tagpress_compress::Options;
use tagpress_geo::NominatimGeocoder;

/// Complete configuration. Every field has a default, so sources only need
/// to name what they override; unknown keys are rejected to catch typos.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub limits: LimitsConfig,
    pub image: ImageConfig,
    pub deflate: DeflateConfig,
    pub geo: GeoConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Largest accepted file, in bytes (inclusive).
    pub max_file_size: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size: 2 * 1024 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    /// Bounding box (in pixels) that re-encoded images are scaled to fit.
    pub max_dimension: u32,
    /// Lossy quality factor, in `(0, 1]`.
    pub quality: f32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        let options = Options::default();
        Self {
            max_dimension: options.max_dimension,
            quality: options.quality,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeflateConfig {
    /// `0..=9`
    pub level: u32,
}

impl Default for DeflateConfig {
    fn default() -> Self {
        Self {
            level: Options::default().level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeoConfig {
    pub enabled: bool,
    /// Nominatim-compatible reverse geocoding URL.
    pub endpoint: String,
    /// Sent as the `User-Agent` header on every lookup.
    pub user_agent: String,
    /// Transport timeout; none when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: NominatimGeocoder::DEFAULT_ENDPOINT.to_string(),
            user_agent: concat!("tagpress/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
        }
    }
}

impl GeoConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Check value ranges that the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.image.max_dimension == 0 {
            exn::bail!(ErrorKind::Invalid("image.max_dimension must be at least 1".to_string()));
        }
        if !(self.image.quality > 0.0 && self.image.quality <= 1.0) {
            exn::bail!(ErrorKind::Invalid(format!(
                "image.quality must be greater than 0 and at most 1, got {}",
                self.image.quality
            )));
        }
        if self.deflate.level > 9 {
            let level = self.deflate.level;
            exn::bail!(ErrorKind::Invalid(format!("deflate.level must be between 0 and 9, got {level}")));
        }
        if self.geo.enabled && self.geo.endpoint.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid("geo.endpoint must not be empty".to_string()));
        }
        if self.geo.timeout_secs == Some(0) {
            exn::bail!(ErrorKind::Invalid("geo.timeout_secs must be at least 1 when set".to_string()));
        }
        Ok(())
    }

    /// Tuning for the compression strategies.
    pub fn compression_options(&self) -> Options {
        Options {
            max_dimension: self.image.max_dimension,
            quality: self.image.quality,
            level: self.deflate.level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults_match_compression_defaults() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.compression_options(), Options::default());
        assert_eq!(config.limits.max_file_size, 2_147_483_648);
        assert!(config.geo.enabled);
        assert_eq!(config.geo.endpoint, NominatimGeocoder::DEFAULT_ENDPOINT);
        assert!(config.geo.user_agent.starts_with("tagpress/"));
        assert_eq!(config.geo.timeout(), None);
    }

    #[rstest]
    #[case::zero_dimension(|c: &mut Config| c.image.max_dimension = 0, "image.max_dimension")]
    #[case::zero_quality(|c: &mut Config| c.image.quality = 0.0, "image.quality")]
    #[case::high_quality(|c: &mut Config| c.image.quality = 1.5, "image.quality")]
    #[case::nan_quality(|c: &mut Config| c.image.quality = f32::NAN, "image.quality")]
    #[case::level(|c: &mut Config| c.deflate.level = 10, "deflate.level")]
    #[case::endpoint(|c: &mut Config| c.geo.endpoint = "  ".to_string(), "geo.endpoint")]
    #[case::timeout(|c: &mut Config| c.geo.timeout_secs = Some(0), "geo.timeout_secs")]
    fn test_validate_rejects(#[case] change: fn(&mut Config), #[case] key: &str) {
        let mut config = Config::default();
        change(&mut config);
        let err = config.validate().unwrap_err();
        match &*err {
            ErrorKind::Invalid(message) => assert!(message.starts_with(key), "{message}"),
            other => panic!("unexpected error kind: {other:?}"),
        }
    }

    #[test]
    fn test_empty_endpoint_is_fine_when_disabled() {
        let mut config = Config::default();
        config.geo.enabled = false;
        config.geo.endpoint = String::new();
        config.validate().unwrap();
    }
}
