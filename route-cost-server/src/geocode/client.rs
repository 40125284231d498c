//! Geocoding service client.
//!
//! Talks to a Nominatim-compatible search endpoint: free-text query in,
//! list of candidate places out. Only the first candidate is used.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Deserializer};
use tracing::debug;

use super::error::GeocodeError;

/// Default base URL for the public Nominatim instance.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default client identification, required by the service's usage policy.
const DEFAULT_USER_AGENT: &str = "route-cost-server/0.1";

/// A place returned by the geocoding service.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub lat: f64,
    pub lng: f64,
    pub display_name: String,
}

/// Free-text address lookup.
///
/// This abstraction lets the geocoder be tested without network access.
pub trait GeocodingService: Send + Sync {
    /// Look up `query`, returning the best match or `None` if nothing matched.
    fn search(&self, query: &str)
    -> impl Future<Output = Result<Option<Place>, GeocodeError>> + Send;
}

/// Search result item. Nominatim sends coordinates as strings; other
/// compatible services send numbers.
#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(deserialize_with = "number_or_string")]
    lat: f64,
    #[serde(deserialize_with = "number_or_string")]
    lon: f64,
    #[serde(default)]
    display_name: String,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    let value: f64 = match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom)?,
    };
    if !value.is_finite() {
        return Err(serde::de::Error::custom(format!(
            "coordinate is not a finite number: {value}"
        )));
    }
    Ok(value)
}

/// Parse a search response body into the first place, if any.
fn parse_search_response(body: &str) -> Result<Option<Place>, GeocodeError> {
    let items: Vec<SearchItem> = serde_json::from_str(body).map_err(|e| GeocodeError::Json {
        message: e.to_string(),
    })?;

    Ok(items.into_iter().next().map(|item| Place {
        lat: item.lat,
        lng: item.lon,
        display_name: item.display_name,
    }))
}

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Value for the User-Agent header
    pub user_agent: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NominatimConfig {
    /// Create a new config with the given client identification.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENT)
    }
}

/// Client for a Nominatim-compatible geocoding API.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    /// Create a new geocoding client.
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();

        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|_| GeocodeError::Api {
                status: 0,
                message: "Invalid User-Agent format".to_string(),
            })?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl GeocodingService for NominatimClient {
    async fn search(&self, query: &str) -> Result<Option<Place>, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        debug!(query, "geocoding request");

        let response = self
            .http
            .get(&url)
            .query(&[("format", "json"), ("q", query), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_search_response(&body)
    }
}
