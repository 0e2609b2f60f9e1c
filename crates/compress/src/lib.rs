//! Type-specific compression strategies for uploaded files.
//!
//! Every accepted file is routed to exactly one [`Strategy`], chosen from its
//! declared media type ([`Strategy::for_media_type`]):
//!
//! - **Raster** re-encodes images, shrinking anything larger than the
//!   configured bounding box while keeping the aspect ratio.
//! - **Archive** opens a zip-family container and rebuilds it with every
//!   entry deflated.
//! - **Deflate** runs the whole buffer through DEFLATE. This is the fallback,
//!   so dispatch is total over every media type.
//!
//! All strategies are bytes in, bytes out. Nothing here touches the
//! filesystem or the network; the only shared state is the read-only
//! [`Options`].
//!
//! Also provides the small reporting helpers the front end needs:
//! [`compression_ratio`] and [`format_file_size`].

mod archive;
mod construct;
mod deflate;
pub mod error;
mod ops;
mod raster;
mod ratio;
mod util;

pub use crate::deflate::inflate;
pub use crate::ops::Options;
pub use crate::ratio::{compression_ratio, format_file_size};

/// A compression strategy.
///
/// Chosen per file by [`Strategy::for_media_type`]; first match wins. Defaults
/// to [`Deflate`](Self::Deflate), the strategy used for anything that is not
/// an image or a zip-family archive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Decode, downscale to fit, re-encode in the declared format.
    Raster,
    /// Rebuild a zip-family container with every entry deflated.
    Archive,
    /// Whole-buffer DEFLATE.
    #[default]
    Deflate,
}
