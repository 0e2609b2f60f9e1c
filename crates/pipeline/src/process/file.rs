use crate::Context;
use crate::error::{ErrorKind, Result};
use crate::models::{FileCandidate, PipelineResult, Processed};
use crate::validate::validate;
use exn::ResultExt;
use std::sync::Arc;
use tagpress_compress::Strategy;
use tagpress_extract::models::ImageMetadata;
use tagpress_extract::{TagSet, category, extract_for, synthesize};
use tracing::{Span, instrument};

/// Run one candidate through validation, compression and tagging.
///
/// Never fails as such: every outcome, including a rejection, is captured in
/// the returned result.
#[instrument(skip_all, fields(
    name = %candidate.name,
    media_type = %candidate.media_type,
    size = candidate.byte_length,
    strategy,
    output_size,
))]
pub(crate) async fn process_file(ctx: Arc<Context>, candidate: FileCandidate) -> PipelineResult {
    let outcome = process_file_inner(&ctx, &candidate).await;
    match &outcome {
        Ok(processed) => tracing::info!(tags = %processed.tags, "Processed"),
        Err(err) => tracing::warn!(reason = %**err, "Failed"),
    }
    PipelineResult::new(&candidate, outcome)
}

async fn process_file_inner(ctx: &Context, candidate: &FileCandidate) -> Result<Processed> {
    let verdict = validate(candidate, &ctx.limits);
    if !verdict.valid {
        exn::bail!(ErrorKind::Rejected(verdict.reason.unwrap_or_default()));
    }

    let strategy = Strategy::for_media_type(&candidate.media_type);
    Span::current().record("strategy", strategy.as_str());

    // No data dependency between the two halves; tag work is thrown away if
    // compression fails.
    let (compressed, (metadata, tags)) = tokio::join!(compress(ctx, strategy, candidate), analyse(ctx, candidate));
    let compressed = compressed?;
    Span::current().record("output_size", compressed.len());

    Ok(Processed {
        compressed,
        strategy,
        tags,
        metadata,
    })
}

async fn compress(ctx: &Context, strategy: Strategy, candidate: &FileCandidate) -> Result<Vec<u8>> {
    let bytes = candidate.bytes.clone();
    let media_type = candidate.media_type.clone();
    let options = ctx.options;
    let span = Span::current();
    tokio::task::spawn_blocking(move || span.in_scope(|| strategy.compress(&bytes, &media_type, &options)))
        .await
        .or_raise(|| ErrorKind::Task)?
        .map_err(ErrorKind::compression)
}

/// Metadata and tags. Best-effort throughout: nothing in here can fail the
/// file. Anything but an image is tagged with its category alone.
async fn analyse(ctx: &Context, candidate: &FileCandidate) -> (ImageMetadata, TagSet) {
    let bytes = candidate.bytes.clone();
    let media_type = candidate.media_type.clone();
    let span = Span::current();
    let extraction = tokio::task::spawn_blocking(move || span.in_scope(|| extract_for(&media_type, &bytes)));
    let metadata = match extraction.await {
        Ok(metadata) => metadata,
        Err(err) => {
            tracing::warn!(error = %err, "Metadata extraction did not finish");
            ImageMetadata::default()
        },
    };

    let mut tags = synthesize(&category(&candidate.media_type), &metadata);
    if let Some((latitude, longitude)) = metadata.coordinates() {
        tags.merge(ctx.geocoder.resolve(latitude, longitude).await.into_iter().collect());
    }
    (metadata, tags)
}
