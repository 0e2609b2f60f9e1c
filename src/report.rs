//! Text and JSON rendering of a batch.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use tagpress_compress::format_file_size;
use tagpress_extract::models::ImageMetadata;
use tagpress_pipeline::{BatchStats, PipelineResult};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const CAPTURE_TIME_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

#[derive(Serialize)]
struct Report<'a> {
    files: Vec<FileReport<'a>>,
    stats: StatsReport<'a>,
}

#[derive(Serialize)]
struct FileReport<'a> {
    name: &'a str,
    media_type: &'a str,
    status: String,
    original_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    compressed_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    strategy: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<MetadataReport<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// Flattened view of [`ImageMetadata`]; absent fields are omitted.
#[derive(Serialize)]
struct MetadataReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    capture_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    altitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    camera_make: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    camera_model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Serialize)]
struct StatsReport<'a> {
    total: usize,
    completed: usize,
    failed: usize,
    counts: &'a BTreeMap<String, usize>,
    original_size: u64,
    compressed_size: u64,
    space_saved: i128,
    savings_percentage: i64,
}

impl<'a> From<&'a PipelineResult> for FileReport<'a> {
    fn from(result: &'a PipelineResult) -> Self {
        let processed = result.processed();
        Self {
            name: &result.name,
            media_type: &result.media_type,
            status: result.status().to_string(),
            original_size: result.original_size,
            compressed_size: result.compressed_size(),
            ratio: result.compression_ratio(),
            strategy: processed.map(|processed| processed.strategy.as_str()),
            tags: processed.map(|processed| processed.tags.iter().map(String::as_str).collect()).unwrap_or_default(),
            metadata: processed
                .map(|processed| &processed.metadata)
                .filter(|metadata| !metadata.is_empty())
                .map(MetadataReport::from),
            reason: result.reason(),
        }
    }
}

impl<'a> From<&'a ImageMetadata> for MetadataReport<'a> {
    fn from(metadata: &'a ImageMetadata) -> Self {
        let location = metadata.location.unwrap_or_default();
        let camera = metadata.camera.as_ref();
        Self {
            capture_time: metadata.capture_time.and_then(|time| time.format(CAPTURE_TIME_FORMAT).ok()),
            latitude: location.latitude,
            longitude: location.longitude,
            altitude: location.altitude,
            camera_make: camera.and_then(|camera| camera.make.as_deref()),
            camera_model: camera.and_then(|camera| camera.model.as_deref()),
            description: metadata.description.as_deref(),
        }
    }
}

impl<'a> From<&'a BatchStats> for StatsReport<'a> {
    fn from(stats: &'a BatchStats) -> Self {
        Self {
            total: stats.total(),
            completed: stats.completed,
            failed: stats.failed,
            counts: &stats.counts,
            original_size: stats.original_size,
            compressed_size: stats.compressed_size,
            space_saved: stats.space_saved(),
            savings_percentage: stats.savings_percentage(),
        }
    }
}

pub(crate) fn json(results: &[PipelineResult], stats: &BatchStats) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Report {
        files: results.iter().map(FileReport::from).collect(),
        stats: StatsReport::from(stats),
    })
}

/// One line per file, then a summary.
pub(crate) fn text(results: &[PipelineResult], stats: &BatchStats) -> String {
    let width = results.iter().map(|result| result.name.chars().count()).max().unwrap_or(0);
    let mut output = String::new();
    // Writing to a String cannot fail.
    for result in results {
        let _ = write!(output, "{:width$}  {:9}  ", result.name, result.status().to_string());
        match (result.processed(), result.reason()) {
            (Some(processed), _) => {
                let _ = write!(
                    output,
                    "{} -> {} ({})",
                    format_file_size(result.original_size),
                    format_file_size(processed.compressed.len() as u64),
                    result.compression_ratio().unwrap_or_default(),
                );
                if !processed.tags.is_empty() {
                    let _ = write!(output, "  [{}]", processed.tags);
                }
            },
            (None, reason) => output.push_str(&reason.unwrap_or_default()),
        }
        output.push('\n');
    }

    let counts: Vec<String> = stats.counts.iter().map(|(category, count)| format!("{category}: {count}")).collect();
    let _ = writeln!(
        output,
        "{} files: {} completed, {} failed ({})",
        stats.total(),
        stats.completed,
        stats.failed,
        counts.join(", ")
    );
    if stats.completed > 0 {
        let _ = writeln!(
            output,
            "{} -> {}, saved {}%",
            format_file_size(stats.original_size),
            format_file_size(stats.compressed_size),
            stats.savings_percentage()
        );
    }
    output
}
