//! Address geocoding.
//!
//! Resolves free-text addresses to coordinates. Lookups go through a
//! persistent cache first; only misses reach the external service, and
//! those are throttled to one request per second.
//!
//! Key characteristics:
//! - Cache keys are normalized addresses, so spelling variants share entries
//! - Cached entries expire after 30 days, checked lazily on read
//! - Literal `"lat,lng"` input never touches the cache or the network

mod cache;
mod client;
mod error;
mod resolver;
mod store;
mod throttle;

pub use cache::{CacheStats, CachedAddress, CachedLocation, GeocodeCache, GeocodeCacheConfig};
pub use client::{GeocodingService, NominatimClient, NominatimConfig, Place};
pub use error::{GeocodeError, StoreError};
pub use resolver::{AddressResolver, DEFAULT_GEOCODE_INTERVAL, Geocoder};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use throttle::Throttle;
