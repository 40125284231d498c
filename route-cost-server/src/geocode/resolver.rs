//! Address resolution: literal coordinates, then cache, then network.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::domain::Coordinates;

use super::cache::{CacheStats, GeocodeCache, GeocodeCacheConfig};
use super::client::GeocodingService;
use super::error::GeocodeError;
use super::store::KeyValueStore;
use super::throttle::Throttle;

/// Minimum spacing between network geocoding calls (service policy).
pub const DEFAULT_GEOCODE_INTERVAL: Duration = Duration::from_secs(1);

/// Turns addresses into coordinates.
///
/// This abstraction lets the estimator be tested with canned locations.
pub trait AddressResolver: Send + Sync {
    /// Resolve an address, or a literal `"lat,lng"` pair.
    fn resolve(&self, address: &str)
    -> impl Future<Output = Result<Coordinates, GeocodeError>> + Send;

    /// Drop stale cached state before a batch of lookups. Returns how many
    /// entries were removed.
    fn sweep_stale(&self) -> usize {
        0
    }
}

/// Geocoder backed by a persistent cache and a throttled remote service.
#[derive(Debug)]
pub struct Geocoder<S, K> {
    service: S,
    cache: GeocodeCache<K>,
    throttle: Throttle,
}

impl<S: GeocodingService, K: KeyValueStore> Geocoder<S, K> {
    /// Create a geocoder with the default cache config and 1 s throttle.
    pub fn new(service: S, store: K) -> Self {
        Self::with_config(
            service,
            GeocodeCache::new(store, GeocodeCacheConfig::default()),
            DEFAULT_GEOCODE_INTERVAL,
        )
    }

    /// Create a geocoder with an explicit cache and minimum call interval.
    pub fn with_config(service: S, cache: GeocodeCache<K>, interval: Duration) -> Self {
        Self {
            service,
            cache,
            throttle: Throttle::new(interval),
        }
    }

    /// Access the cache, for eviction and statistics.
    pub fn cache(&self) -> &GeocodeCache<K> {
        &self.cache
    }

    /// Cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl<S: GeocodingService, K: KeyValueStore> AddressResolver for Geocoder<S, K> {
    async fn resolve(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return Err(GeocodeError::NotFound {
                address: address.to_string(),
            });
        }

        // Manual coordinate entry skips cache and network
        if let Some(coords) = Coordinates::parse_literal(trimmed) {
            return Ok(coords);
        }

        if let Some(hit) = self.cache.get(trimmed) {
            debug!(address = trimmed, "geocode cache hit");
            return Ok(Coordinates::new(hit.lat, hit.lng));
        }

        debug!(address = trimmed, "geocode cache miss");
        self.throttle.wait().await;

        let place = self
            .service
            .search(trimmed)
            .await?
            .ok_or_else(|| GeocodeError::NotFound {
                address: address.to_string(),
            })?;

        let coords = Coordinates::new(place.lat, place.lng);
        if !coords.is_valid() {
            return Err(GeocodeError::Json {
                message: format!("coordinates out of range: {coords}"),
            });
        }

        self.cache
            .set(trimmed, place.lat, place.lng, &place.display_name);

        Ok(coords)
    }

    fn sweep_stale(&self) -> usize {
        self.cache.sweep_expired()
    }
}
