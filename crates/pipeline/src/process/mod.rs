//! Batch orchestration.
//!
//! [`Pipeline::run`](crate::Pipeline::run) and
//! [`Pipeline::process`](crate::Pipeline::process) fan every candidate out to
//! its own task. Within a file, compression and metadata/tag work run side by
//! side; the geocoding lookup waits for the extracted coordinates.

mod file;
mod stream;

pub use self::stream::PipelineEvent;
