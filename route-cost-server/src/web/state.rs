//! Application state for the web layer.

use std::sync::Arc;

use crate::estimate::CostEstimator;
use crate::geocode::{FileStore, Geocoder, NominatimClient};
use crate::routing::{CachedRouter, OsrmClient};

/// Estimator wired to the public services and the on-disk geocode cache.
pub type LiveEstimator =
    CostEstimator<Geocoder<NominatimClient, FileStore>, CachedRouter<OsrmClient>>;

/// Shared application state.
///
/// Generic over the geocoding service, cache store and router so the
/// handlers can be exercised against fakes.
pub struct AppState<S, K, R> {
    /// Route cost estimator, which also owns the geocoder and its cache
    pub estimator: Arc<CostEstimator<Geocoder<S, K>, R>>,
}

impl<S, K, R> AppState<S, K, R> {
    /// Create a new app state.
    pub fn new(estimator: CostEstimator<Geocoder<S, K>, R>) -> Self {
        Self {
            estimator: Arc::new(estimator),
        }
    }
}

impl<S, K, R> Clone for AppState<S, K, R> {
    fn clone(&self) -> Self {
        Self {
            estimator: Arc::clone(&self.estimator),
        }
    }
}
