//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::geocode::NominatimConfig;
use crate::routing::OsrmConfig;

/// Error returned when an environment variable holds an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {value:?}")]
pub struct ConfigError {
    var: &'static str,
    value: String,
}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (`BIND_ADDR`).
    pub bind_addr: SocketAddr,

    /// Geocoding service base URL (`GEOCODER_URL`).
    pub geocoder_url: String,

    /// User-Agent sent to the geocoding service (`GEOCODER_USER_AGENT`).
    pub geocoder_user_agent: String,

    /// Routing service base URL (`ROUTER_URL`).
    pub router_url: String,

    /// Directory for the persistent geocode cache (`CACHE_DIR`).
    pub cache_dir: PathBuf,

    /// Timeout for outbound HTTP requests (`HTTP_TIMEOUT_SECS`).
    pub http_timeout_secs: u64,
}

impl ServerConfig {
    /// Read settings from process environment variables, using defaults for
    /// anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read settings through `lookup`, using defaults for anything it
    /// does not supply.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("BIND_ADDR") {
            config.bind_addr = value.parse().map_err(|_| ConfigError {
                var: "BIND_ADDR",
                value,
            })?;
        }
        if let Some(value) = lookup("GEOCODER_URL") {
            config.geocoder_url = value;
        }
        if let Some(value) = lookup("GEOCODER_USER_AGENT") {
            config.geocoder_user_agent = value;
        }
        if let Some(value) = lookup("ROUTER_URL") {
            config.router_url = value;
        }
        if let Some(value) = lookup("CACHE_DIR") {
            config.cache_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs = value.parse().map_err(|_| ConfigError {
                var: "HTTP_TIMEOUT_SECS",
                value,
            })?;
        }

        Ok(config)
    }

    /// Geocoding client settings.
    pub fn nominatim(&self) -> NominatimConfig {
        NominatimConfig::new(&self.geocoder_user_agent)
            .with_base_url(&self.geocoder_url)
            .with_timeout(self.http_timeout_secs)
    }

    /// Routing client settings.
    pub fn osrm(&self) -> OsrmConfig {
        OsrmConfig::default()
            .with_base_url(&self.router_url)
            .with_timeout(self.http_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        let nominatim = NominatimConfig::default();
        let osrm = OsrmConfig::default();

        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            geocoder_url: nominatim.base_url,
            geocoder_user_agent: nominatim.user_agent,
            router_url: osrm.base_url,
            cache_dir: PathBuf::from("cache"),
            http_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.geocoder_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.router_url, "https://router.project-osrm.org");
        assert_eq!(config.cache_dir, PathBuf::from("cache"));
        assert_eq!(config.http_timeout_secs, 30);
    }

    #[test]
    fn overrides_from_environment() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("GEOCODER_URL", "http://geo.internal"),
            ("GEOCODER_USER_AGENT", "fleet/1.0 (ops@example.com)"),
            ("ROUTER_URL", "http://osrm.internal"),
            ("CACHE_DIR", "/var/cache/routes"),
            ("HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(config.nominatim().base_url, "http://geo.internal");
        assert_eq!(config.nominatim().user_agent, "fleet/1.0 (ops@example.com)");
        assert_eq!(config.nominatim().timeout_secs, 5);
        assert_eq!(config.osrm().base_url, "http://osrm.internal");
        assert_eq!(config.osrm().timeout_secs, 5);
        assert_eq!(config.cache_dir, PathBuf::from("/var/cache/routes"));
    }

    #[test]
    fn rejects_bad_values() {
        let err = ServerConfig::from_lookup(lookup(&[("BIND_ADDR", "nowhere")])).unwrap_err();
        assert_eq!(err.to_string(), "invalid value for BIND_ADDR: \"nowhere\"");

        assert!(ServerConfig::from_lookup(lookup(&[("HTTP_TIMEOUT_SECS", "soon")])).is_err());
    }
}
