use crate::models::{FileCandidate, ValidationVerdict};
use tagpress_compress::format_file_size;

/// Media types accepted for processing, matched as prefixes of the declared
/// type. The `*/` entries admit whole families; the rest are the document and
/// archive formats the front end offers.
pub const ACCEPTED_MEDIA_TYPES: &[&str] = &[
    "image/",
    "video/",
    "audio/",
    "application/pdf",
    "application/zip",
    "application/x-zip-compressed",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
];

/// Admission policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Largest accepted declared size, inclusive.
    pub max_file_size: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_size: 2 * 1024 * 1024 * 1024,
        }
    }
}

/// Accept or reject a candidate on its declared size and media type.
///
/// Size is checked first. Media types are compared case-insensitively.
pub fn validate(candidate: &FileCandidate, limits: &Limits) -> ValidationVerdict {
    if candidate.byte_length > limits.max_file_size {
        return ValidationVerdict::reject(format!(
            "File size exceeds {} limit",
            format_file_size(limits.max_file_size)
        ));
    }
    let media_type = candidate.media_type.trim().to_ascii_lowercase();
    if !ACCEPTED_MEDIA_TYPES.iter().any(|accepted| media_type.starts_with(accepted)) {
        return ValidationVerdict::reject("File type not supported");
    }
    ValidationVerdict::accept()
}
