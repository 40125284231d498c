//! Persistent geocode cache.
//!
//! Maps normalized address strings to coordinates. The whole cache is one
//! JSON blob stored under a fixed key in a [`KeyValueStore`], so every
//! operation is a read-modify-write of that blob.
//!
//! Entries expire after a TTL (30 days by default). Expired entries are
//! removed lazily when read, or in bulk by [`GeocodeCache::sweep_expired`].
//!
//! The cache is an optimization only: storage and parse failures are logged
//! and treated as misses, never surfaced to callers.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::normalize_address;

use super::store::KeyValueStore;

/// Default store key for the cache blob.
const DEFAULT_STORE_KEY: &str = "geocode_cache";

/// Default TTL: 30 days.
const DEFAULT_TTL_DAYS: i64 = 30;

/// A cached geocoding result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedAddress {
    pub normalized_key: String,
    pub original_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
    pub stored_at: DateTime<Utc>,
}

/// What a cache hit returns.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedLocation {
    pub lat: f64,
    pub lng: f64,
    pub display_name: String,
}

/// Read-only cache statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of stored entries, including expired ones not yet swept.
    pub count: usize,
    /// Timestamp of the oldest entry.
    pub oldest: Option<DateTime<Utc>>,
    /// Timestamp of the newest entry.
    pub newest: Option<DateTime<Utc>>,
}

/// Configuration for the geocode cache.
#[derive(Debug, Clone)]
pub struct GeocodeCacheConfig {
    /// Key the blob is stored under.
    pub store_key: String,
    /// How long an entry stays valid.
    pub ttl: Duration,
}

impl GeocodeCacheConfig {
    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set a custom store key.
    pub fn with_store_key(mut self, key: impl Into<String>) -> Self {
        self.store_key = key.into();
        self
    }
}

impl Default for GeocodeCacheConfig {
    fn default() -> Self {
        Self {
            store_key: DEFAULT_STORE_KEY.to_string(),
            ttl: Duration::days(DEFAULT_TTL_DAYS),
        }
    }
}

type Entries = BTreeMap<String, CachedAddress>;

/// Geocode cache over a key-value store.
#[derive(Debug)]
pub struct GeocodeCache<S> {
    store: S,
    config: GeocodeCacheConfig,
}

impl<S: KeyValueStore> GeocodeCache<S> {
    /// Create a cache with the given store and config.
    pub fn new(store: S, config: GeocodeCacheConfig) -> Self {
        Self { store, config }
    }

    /// Look up an address, treating entries older than the TTL as absent.
    pub fn get(&self, address: &str) -> Option<CachedLocation> {
        self.get_at(address, Utc::now())
    }

    /// Look up an address as of `now`.
    ///
    /// An expired entry is removed from the store before returning `None`.
    pub fn get_at(&self, address: &str, now: DateTime<Utc>) -> Option<CachedLocation> {
        let key = normalize_address(address);
        let mut entries = self.load();

        let entry = entries.get(&key)?;

        if self.is_expired(entry, now) {
            debug!(key = %key, "geocode cache entry expired");
            entries.remove(&key);
            self.save(&entries);
            return None;
        }

        Some(CachedLocation {
            lat: entry.latitude,
            lng: entry.longitude,
            display_name: entry.display_name.clone(),
        })
    }

    /// Store a geocoding result, overwriting any existing entry.
    pub fn set(&self, address: &str, lat: f64, lng: f64, display_name: &str) {
        self.set_at(address, lat, lng, display_name, Utc::now());
    }

    /// Store a geocoding result stamped with `now`.
    ///
    /// Addresses that normalize to an empty key are not stored, and neither
    /// are non-finite coordinates, which would not survive a JSON round trip.
    pub fn set_at(
        &self,
        address: &str,
        lat: f64,
        lng: f64,
        display_name: &str,
        now: DateTime<Utc>,
    ) {
        let key = normalize_address(address);
        if key.is_empty() {
            return;
        }
        if !lat.is_finite() || !lng.is_finite() {
            warn!(key = %key, lat, lng, "refusing to cache non-finite coordinates");
            return;
        }

        let mut entries = self.load();
        entries.insert(
            key.clone(),
            CachedAddress {
                normalized_key: key,
                original_address: address.to_string(),
                latitude: lat,
                longitude: lng,
                display_name: display_name.to_string(),
                stored_at: now,
            },
        );
        self.save(&entries);
    }

    /// Remove an address. No-op if absent.
    pub fn remove(&self, address: &str) {
        let key = normalize_address(address);
        let mut entries = self.load();
        if entries.remove(&key).is_some() {
            self.save(&entries);
        }
    }

    /// Remove every expired entry. Returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Utc::now())
    }

    /// Remove every entry expired as of `now`.
    pub fn sweep_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.load();
        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry, now));
        let removed = before - entries.len();

        if removed > 0 {
            debug!(removed, "swept expired geocode cache entries");
            self.save(&entries);
        }

        removed
    }

    /// Entry count and timestamp range.
    pub fn stats(&self) -> CacheStats {
        let entries = self.load();
        let stamps = entries.values().map(|e| e.stored_at);

        CacheStats {
            count: entries.len(),
            oldest: stamps.clone().min(),
            newest: stamps.max(),
        }
    }

    fn is_expired(&self, entry: &CachedAddress, now: DateTime<Utc>) -> bool {
        now - entry.stored_at > self.config.ttl
    }

    fn load(&self) -> Entries {
        let raw = match self.store.read(&self.config.store_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Entries::new(),
            Err(e) => {
                warn!(error = %e, "failed to read geocode cache, treating as empty");
                return Entries::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "corrupt geocode cache, treating as empty");
            Entries::new()
        })
    }

    fn save(&self, entries: &Entries) {
        let json = match serde_json::to_string(entries) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize geocode cache");
                return;
            }
        };

        if let Err(e) = self.store.write(&self.config.store_key, &json) {
            warn!(error = %e, "failed to write geocode cache");
        }
    }
}
