//! Validate, compress and tag batches of user-supplied files.
//!
//! Each [`FileCandidate`] goes through, independently of every other file:
//!
//! 1. [`validate`]: rejection is a per-file failure, nothing else runs.
//! 2. Concurrently:
//!    - the [`Strategy`](tagpress_compress::Strategy) matching its media type;
//!    - for images, metadata extraction and tag synthesis, followed by a
//!      reverse geocoding lookup when the photo carries a usable position.
//!      Other files are tagged with their media category alone.
//! 3. A compression failure fails the file and discards its tags. Missing
//!    metadata and failed geocoding never do; they only mean fewer tags.
//!
//! [`Pipeline::run`] returns exactly one [`PipelineResult`] per candidate, in
//! input order. [`Pipeline::process`] streams the same results as they
//! complete, for callers that want to show progress.

pub mod error;
mod models;
mod process;
mod stats;
mod validate;

pub use crate::models::{FileCandidate, FileStatus, PipelineResult, Processed, ValidationVerdict};
pub use crate::process::PipelineEvent;
pub use crate::stats::BatchStats;
pub use crate::validate::{ACCEPTED_MEDIA_TYPES, Limits, validate};
use std::sync::Arc;
use tagpress_compress::Options;
use tagpress_geo::{DisabledGeocoder, GeocoderHandle};

/// Everything a file's processing needs, shared read-only by every worker.
#[derive(Clone)]
pub struct Context {
    pub limits: Limits,
    pub options: Options,
    pub geocoder: GeocoderHandle,
}

impl Context {
    /// Default limits and compression options, geocoding through `geocoder`.
    pub fn new(geocoder: GeocoderHandle) -> Self {
        Self {
            limits: Limits::default(),
            options: Options::default(),
            geocoder,
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }
}

impl Default for Context {
    /// Default limits and options, without geocoding.
    fn default() -> Self {
        Self::new(Arc::new(DisabledGeocoder))
    }
}

/// Cheaply cloneable handle for running batches; see the crate docs.
#[derive(Clone)]
pub struct Pipeline {
    ctx: Arc<Context>,
}

impl Pipeline {
    pub fn new(ctx: Context) -> Self {
        Self { ctx: Arc::new(ctx) }
    }
}
