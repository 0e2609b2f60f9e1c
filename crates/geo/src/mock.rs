//! Canned geocoder for testing.

use crate::ReverseGeocoder;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

/// Geocoder returning a fixed answer for every position, and remembering
/// which positions it was asked about.
///
/// # Examples
///
/// ```
/// use tagpress_geo::{MockGeocoder, ReverseGeocoder};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let geocoder = MockGeocoder::with_tags(["Paris", "France"]);
/// assert_eq!(geocoder.resolve(48.8566, 2.3522).await, vec!["paris", "france"]);
/// assert_eq!(geocoder.calls().await, vec![(48.8566, 2.3522)]);
/// # }
/// ```
pub struct MockGeocoder {
    answer: std::result::Result<Vec<String>, ErrorKind>,
    calls: Mutex<Vec<(f64, f64)>>,
    gate: Option<Arc<Notify>>,
}

impl MockGeocoder {
    /// Answer every lookup with these tags (lowercased and trimmed, as a real
    /// service's address would be).
    pub fn with_tags(tags: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        let tags = tags.into_iter().map(|tag| tag.as_ref().trim().to_lowercase()).collect();
        Self {
            answer: Ok(tags),
            calls: Mutex::default(),
            gate: None,
        }
    }

    /// Fail every lookup.
    pub fn failing(kind: ErrorKind) -> Self {
        Self {
            answer: Err(kind),
            calls: Mutex::default(),
            gate: None,
        }
    }

    /// Hold every lookup until `gate` hands out a permit, to simulate a slow
    /// service. Each lookup consumes one permit.
    pub fn held_by(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Every position looked up so far, in call order.
    pub async fn calls(&self) -> Vec<(f64, f64)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl ReverseGeocoder for MockGeocoder {
    async fn lookup(&self, latitude: f64, longitude: f64) -> Result<Vec<String>> {
        self.calls.lock().await.push((latitude, longitude));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.answer {
            Ok(tags) => Ok(tags.clone()),
            Err(kind) => exn::bail!(kind.clone()),
        }
    }
}
