//! Reading candidates from disk and writing compressed files back.

use bytes::Bytes;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tagpress_pipeline::{FileCandidate, FileStatus, Limits, PipelineResult};

/// Prefix of every written output file.
pub(crate) const OUTPUT_PREFIX: &str = "compressed_";

pub(crate) async fn read_candidates(
    paths: &[PathBuf],
    media_type: Option<&str>,
    limits: &Limits,
) -> Result<Vec<FileCandidate>> {
    let mut candidates = Vec::with_capacity(paths.len());
    for path in paths {
        candidates.push(read_candidate(path, media_type, limits).await?);
    }
    Ok(candidates)
}

/// Files over the size limit are declared by size only; their content is
/// never read, since validation will turn them away anyway.
async fn read_candidate(path: &Path, media_type: Option<&str>, limits: &Limits) -> Result<FileCandidate> {
    let metadata = tokio::fs::metadata(path)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("could not read {}", path.display()))?;
    if !metadata.is_file() {
        miette::bail!("not a file: {}", path.display());
    }
    let bytes = if metadata.len() > limits.max_file_size {
        Bytes::new()
    } else {
        tokio::fs::read(path)
            .await
            .into_diagnostic()
            .wrap_err_with(|| format!("could not read {}", path.display()))?
            .into()
    };
    Ok(FileCandidate {
        name: file_name(path),
        media_type: media_type.map_or_else(|| guess_media_type(path), str::to_string),
        byte_length: metadata.len(),
        bytes,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Guessed from the extension; unknown extensions become
/// `application/octet-stream`, which validation rejects.
fn guess_media_type(path: &Path) -> String {
    mime_guess::from_path(path).first_or_octet_stream().essence_str().to_string()
}

/// Write every completed file's compressed bytes into `dir`. A file that
/// cannot be written is logged and skipped.
pub(crate) async fn write_outputs(dir: &Path, results: &[PipelineResult]) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("could not create {}", dir.display()))?;
    let mut taken = HashSet::new();
    for result in results.iter().filter(|result| result.status() == FileStatus::Completed) {
        let Some(processed) = result.processed() else {
            continue;
        };
        let path = dir.join(output_name(&result.name, &mut taken));
        match tokio::fs::write(&path, &processed.compressed).await {
            Ok(()) => tracing::debug!(path = %path.display(), bytes = processed.compressed.len(), "Written"),
            Err(err) => tracing::error!(path = %path.display(), error = %err, "Could not write compressed file"),
        }
    }
    Ok(())
}

/// `compressed_<name>`, numbered when an earlier input in the same batch
/// already claimed that name (`compressed_photo-2.jpg`).
fn output_name(name: &str, taken: &mut HashSet<String>) -> String {
    let mut candidate = format!("{OUTPUT_PREFIX}{name}");
    if taken.contains(&candidate) {
        let path = Path::new(name);
        let stem = path.file_stem().map_or_else(|| name.to_string(), |stem| stem.to_string_lossy().into_owned());
        let extension = path.extension().map(|ext| format!(".{}", ext.to_string_lossy())).unwrap_or_default();
        candidate = (2..)
            .map(|n| format!("{OUTPUT_PREFIX}{stem}-{n}{extension}"))
            .find(|numbered| !taken.contains(numbered))
            .unwrap_or(candidate);
        tracing::warn!(input = name, output = %candidate, "Another input has the same file name; numbering the output");
    }
    taken.insert(candidate.clone());
    candidate
}
