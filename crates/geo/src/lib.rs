//! Reverse geocoding for location tags.
//!
//! A [`ReverseGeocoder`] turns a coordinate pair into a list of lowercase
//! place tokens (road, city, country...). Lookups are a single best-effort
//! network call: [`resolve`](ReverseGeocoder::resolve) never fails, it
//! returns no tags instead. Use [`lookup`](ReverseGeocoder::lookup) when the
//! reason matters.
//!
//! Implementations must be safe for concurrent, independent use; a single
//! handle is shared by every file in a batch.

mod address;
pub mod error;
#[cfg(feature = "mock")]
mod mock;
mod nominatim;

pub use crate::address::flatten_address;
use crate::error::Result;
#[cfg(feature = "mock")]
pub use crate::mock::MockGeocoder;
pub use crate::nominatim::NominatimGeocoder;
use async_trait::async_trait;
use std::sync::Arc;

pub type GeocoderHandle = Arc<dyn ReverseGeocoder>;

#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Look up the place at the given position (decimal degrees).
    async fn lookup(&self, latitude: f64, longitude: f64) -> Result<Vec<String>>;

    /// Like [`lookup`](Self::lookup), but any failure yields no tags.
    async fn resolve(&self, latitude: f64, longitude: f64) -> Vec<String> {
        match self.lookup(latitude, longitude).await {
            Ok(tags) => tags,
            Err(err) => {
                tracing::debug!(error = ?err, latitude, longitude, "Reverse geocoding unavailable");
                Vec::new()
            },
        }
    }
}

/// Geocoder that never contributes tags and never touches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGeocoder;

#[async_trait]
impl ReverseGeocoder for DisabledGeocoder {
    async fn lookup(&self, _latitude: f64, _longitude: f64) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}
