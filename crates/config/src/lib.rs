//! Layered configuration for tagpress.
//!
//! Defaults reproduce the fixed behaviour of the pipeline (2 GiB limit,
//! 2048px images at quality 0.7, DEFLATE level 7, geocoding against the
//! public OpenStreetMap Nominatim instance), so an empty configuration is a
//! valid one. Files and `TAGPRESS_*` environment variables override
//! individual keys; see [`Config::figment`] for precedence.
//!
//! ```toml
//! [limits]
//! max_file_size = 2147483648
//!
//! [image]
//! max_dimension = 2048
//! quality = 0.7
//!
//! [deflate]
//! level = 7
//!
//! [geo]
//! enabled = true
//! endpoint = "https://nominatim.openstreetmap.org/reverse"
//! user_agent = "tagpress/0.1.0"
//! # timeout_secs = 10
//! ```

pub mod error;
mod load;
mod models;

pub use crate::load::ENV_PREFIX;
pub use crate::models::{Config, DeflateConfig, GeoConfig, ImageConfig, LimitsConfig};
