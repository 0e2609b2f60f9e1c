mod metadata;
mod tag;

pub use self::metadata::{Camera, ImageMetadata, Location};
pub use self::tag::TagSet;
