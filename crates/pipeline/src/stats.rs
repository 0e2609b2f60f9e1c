use crate::models::{FileStatus, PipelineResult};
use std::collections::BTreeMap;

/// Totals over a batch of results.
///
/// Sizes only cover completed files, so that a rejected upload does not read
/// as space saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Number of results per media category (`"image"`, `"application"`...),
    /// completed or not.
    pub counts: BTreeMap<String, usize>,
    pub completed: usize,
    pub failed: usize,
    pub original_size: u64,
    pub compressed_size: u64,
}

impl BatchStats {
    pub fn from_results(results: &[PipelineResult]) -> Self {
        let mut stats = Self::default();
        for result in results {
            *stats.counts.entry(result.category()).or_default() += 1;
            match (result.status(), result.compressed_size()) {
                (FileStatus::Completed, Some(compressed)) => {
                    stats.completed += 1;
                    stats.original_size += result.original_size;
                    stats.compressed_size += compressed;
                },
                _ => stats.failed += 1,
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.completed + self.failed
    }

    /// Bytes saved; negative when compression grew the batch overall.
    pub fn space_saved(&self) -> i128 {
        i128::from(self.original_size) - i128::from(self.compressed_size)
    }

    /// `round(saved / original * 100)`, or 0 for an empty batch.
    pub fn savings_percentage(&self) -> i64 {
        if self.original_size == 0 {
            return 0;
        }
        // Lossy beyond 2^53 bytes, far past any realistic batch.
        let percentage = self.space_saved() as f64 / self.original_size as f64 * 100.0;
        (percentage + 0.5).floor() as i64
    }
}
