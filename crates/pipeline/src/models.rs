use crate::error::Result;
use bytes::Bytes;
use derive_more::Display;
use tagpress_compress::{Strategy, compression_ratio};
use tagpress_extract::TagSet;
use tagpress_extract::models::ImageMetadata;

/// One input file, prior to any processing.
///
/// The bytes are reference-counted: the caller may keep its own handle on
/// the original (to offer it for download later) while the pipeline works.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub name: String,
    /// e.g. `"image/jpeg"`
    pub media_type: String,
    /// Declared size, checked against the size ceiling. Normally the length of
    /// `bytes`, but a caller may know the size before reading the content.
    pub byte_length: u64,
    pub bytes: Bytes,
}

impl FileCandidate {
    /// A candidate whose declared size is the length of its content.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            media_type: media_type.into(),
            byte_length: bytes.len() as u64,
            bytes,
        }
    }
}

/// Outcome of validating a single candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationVerdict {
    pub valid: bool,
    /// Human-readable reason; present exactly when `valid` is false.
    pub reason: Option<String>,
}

impl ValidationVerdict {
    pub(crate) fn accept() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub(crate) fn reject(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// Everything produced for a file that made it through.
#[derive(Debug, Clone)]
pub struct Processed {
    pub compressed: Vec<u8>,
    /// Which strategy produced `compressed`; needed to interpret it later.
    pub strategy: Strategy,
    pub tags: TagSet,
    /// Empty for anything that is not an image.
    pub metadata: ImageMetadata,
}

/// Display state of a file record.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// Submitted, but no result yet. Never produced by the pipeline itself.
    #[display("processing")]
    Processing,
    #[display("completed")]
    Completed,
    #[display("failed")]
    Failed,
}

/// The result for exactly one [`FileCandidate`].
#[derive(Debug)]
pub struct PipelineResult {
    pub name: String,
    pub media_type: String,
    /// The candidate's declared size.
    pub original_size: u64,
    pub outcome: Result<Processed>,
}

impl PipelineResult {
    pub(crate) fn new(candidate: &FileCandidate, outcome: Result<Processed>) -> Self {
        Self {
            name: candidate.name.clone(),
            media_type: candidate.media_type.clone(),
            original_size: candidate.byte_length,
            outcome,
        }
    }

    pub fn status(&self) -> FileStatus {
        match self.outcome {
            Ok(_) => FileStatus::Completed,
            Err(_) => FileStatus::Failed,
        }
    }

    pub fn processed(&self) -> Option<&Processed> {
        self.outcome.as_ref().ok()
    }

    /// Why the file failed, for display; `None` on success.
    pub fn reason(&self) -> Option<String> {
        self.outcome.as_ref().err().map(|err| (**err).to_string())
    }

    /// Top-level media type segment, e.g. `"image"`.
    pub fn category(&self) -> String {
        tagpress_extract::category(&self.media_type)
    }

    pub fn compressed_size(&self) -> Option<u64> {
        self.processed().map(|processed| processed.compressed.len() as u64)
    }

    /// Space saved as a percentage string, e.g. `"42%"`; `None` on failure.
    pub fn compression_ratio(&self) -> Option<String> {
        self.compressed_size().map(|compressed| compression_ratio(self.original_size, compressed))
    }
}
