use crate::Pipeline;
use crate::error::{ErrorKind, Result};
use crate::models::{FileCandidate, PipelineResult, Processed};
use crate::process::file::process_file;
use async_stream::stream;
use bytes::Bytes;
use exn::ResultExt;
use futures::stream::FuturesUnordered;
use futures::{Stream, StreamExt};
use std::pin::pin;
use std::sync::Arc;

/// Progress events emitted by [`Pipeline::process`].
///
/// Events follow a strict ordering:
/// 1. [`Started`](Self::Started) exactly once, with the number of candidates.
/// 2. [`Processed`](Self::Processed) exactly once per candidate, in
///    completion order.
/// 3. [`Complete`](Self::Complete) exactly once, signalling the stream is
///    finished.
#[derive(Debug)]
pub enum PipelineEvent {
    Started(u64),
    /// `index` is the candidate's position in the input.
    Processed { index: usize, result: Box<PipelineResult> },
    Complete,
}

impl Pipeline {
    /// Streams [`PipelineEvent`]s while every candidate is processed.
    ///
    /// All candidates start immediately, each on its own task; CPU-heavy work
    /// runs on the blocking pool. A failing or panicking file only ever
    /// produces its own failed result. Dropping the stream stops reporting,
    /// but files already started still run to completion in the background.
    pub fn process(&self, candidates: Vec<FileCandidate>) -> impl Stream<Item = PipelineEvent> + Send + 'static {
        let ctx = Arc::clone(&self.ctx);
        // `rustfmt` does not format macros that use braces. Wrap in parentheses!
        stream!({
            // Infallible: a usize (either 32- or 64-bit) will always fit in a u64.
            yield PipelineEvent::Started(u64::try_from(candidates.len()).unwrap_or(0));

            let mut processing = FuturesUnordered::new();
            for (index, candidate) in candidates.into_iter().enumerate() {
                // Enough to report a failure if the task never returns.
                let header = FileCandidate {
                    bytes: Bytes::new(),
                    ..candidate.clone()
                };
                let handle = tokio::spawn(process_file(Arc::clone(&ctx), candidate));
                processing.push(async move {
                    let result = match handle.await {
                        Ok(result) => result,
                        Err(err) => {
                            tracing::error!(name = %header.name, error = %err, "File task did not finish");
                            let outcome: Result<Processed> = Err(err).or_raise(|| ErrorKind::Task);
                            PipelineResult::new(&header, outcome)
                        },
                    };
                    (index, result)
                });
            }

            while let Some((index, result)) = processing.next().await {
                yield PipelineEvent::Processed {
                    index,
                    result: Box::new(result),
                };
            }

            yield PipelineEvent::Complete;
        })
    }

    /// Process a batch, returning one result per candidate in input order.
    pub async fn run(&self, candidates: Vec<FileCandidate>) -> Vec<PipelineResult> {
        let mut slots: Vec<Option<PipelineResult>> = std::iter::repeat_with(|| None).take(candidates.len()).collect();
        let mut events = pin!(self.process(candidates));
        while let Some(event) = events.next().await {
            if let PipelineEvent::Processed { index, result } = event {
                slots[index] = Some(*result);
            }
        }
        // Every index is reported exactly once.
        slots.into_iter().flatten().collect()
    }
}
