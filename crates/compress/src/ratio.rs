//! Size reporting helpers.

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Percentage of space saved by compression, as a display string.
///
/// Computed as `round(100 * (original - compressed) / original)`, rounding
/// halves upwards. Growth yields a negative percentage. An empty original
/// has no meaningful ratio and is reported as `"0%"`.
///
/// ```
/// use tagpress_compress::compression_ratio;
///
/// assert_eq!(compression_ratio(1000, 300), "70%");
/// assert_eq!(compression_ratio(0, 300), "0%");
/// ```
#[must_use]
pub fn compression_ratio(original: u64, compressed: u64) -> String {
    if original == 0 {
        return "0%".to_string();
    }
    // Lossy for sizes above 2^53 bytes, which is far beyond any upload limit.
    let original = original as f64;
    let ratio = (original - compressed as f64) / original * 100.0;
    format!("{}%", (ratio + 0.5).floor() as i64)
}

/// Human-readable file size in base-1024 units, up to GB.
///
/// ```
/// use tagpress_compress::format_file_size;
///
/// assert_eq!(format_file_size(0), "0 Bytes");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// ```
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    while unit + 1 < UNITS.len() && bytes >= 1024u64.pow(u32::try_from(unit + 1).unwrap_or(u32::MAX)) {
        unit += 1;
    }
    let value = bytes as f64 / 1024u64.pow(u32::try_from(unit).unwrap_or(0)) as f64;
    let value = format!("{value:.2}");
    let value = value.trim_end_matches('0').trim_end_matches('.');
    format!("{value} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, "0%")]
    #[case(0, 1234, "0%")]
    #[case(100, 100, "0%")]
    #[case(100, 0, "100%")]
    #[case(1000, 300, "70%")]
    #[case(1000, 1100, "-10%")]
    #[case(3, 2, "33%")]
    #[case(3, 1, "67%")]
    // Halves round up, including for negative ratios.
    #[case(200, 199, "1%")]
    #[case(200, 201, "0%")]
    #[case(200, 205, "-2%")]
    fn test_compression_ratio(#[case] original: u64, #[case] compressed: u64, #[case] expected: &str) {
        assert_eq!(compression_ratio(original, compressed), expected);
    }

    #[test]
    fn test_compression_ratio_is_deterministic() {
        assert_eq!(compression_ratio(5_000_000, 1_234_567), compression_ratio(5_000_000, 1_234_567));
    }

    #[rstest]
    #[case(0, "0 Bytes")]
    #[case(1, "1 Bytes")]
    #[case(1023, "1023 Bytes")]
    #[case(1024, "1 KB")]
    #[case(1536, "1.5 KB")]
    #[case(1_048_576, "1 MB")]
    #[case(5_242_880, "5 MB")]
    #[case(1_234_567, "1.18 MB")]
    #[case(2_147_483_648, "2 GB")]
    #[case(3 * 1024 * 1024 * 1024 * 1024, "3072 GB")]
    fn test_format_file_size(#[case] bytes: u64, #[case] expected: &str) {
        assert_eq!(format_file_size(bytes), expected);
    }
}
