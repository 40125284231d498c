//! In-memory caching layer for route lookups.
//!
//! An estimate resolves the same base → destination pairs every time a user
//! recalculates with different fuel prices or frequencies. Routes between
//! fixed points change rarely, so successful lookups are kept for a short
//! TTL. Failures are never cached.
//!
//! Coordinates are quantized to micro-degrees (~0.1 m) for the key, which
//! bounds floating-point noise without merging distinct addresses.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::Coordinates;

use super::client::{RouteSummary, RoutingService};
use super::error::RouteError;

/// Cache key: quantized (origin, destination).
type RouteKey = ((i64, i64), (i64, i64));

/// Configuration for the route cache.
#[derive(Debug, Clone)]
pub struct RouteCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for RouteCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 1000,
        }
    }
}

fn quantize(c: Coordinates) -> (i64, i64) {
    ((c.lat * 1e6).round() as i64, (c.lng * 1e6).round() as i64)
}

/// Routing service with caching.
///
/// Wraps any `RoutingService` and caches successful summaries.
pub struct CachedRouter<R> {
    inner: R,
    routes: MokaCache<RouteKey, RouteSummary>,
}

impl<R: RoutingService> CachedRouter<R> {
    /// Create a new cached router.
    pub fn new(inner: R, config: &RouteCacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, routes }
    }
}

impl<R: RoutingService> RoutingService for CachedRouter<R> {
    async fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<RouteSummary, RouteError> {
        let key = (quantize(origin), quantize(destination));

        if let Some(cached) = self.routes.get(&key).await {
            return Ok(cached);
        }

        let summary = self.inner.route(origin, destination).await?;
        self.routes.insert(key, summary).await;

        Ok(summary)
    }
}
