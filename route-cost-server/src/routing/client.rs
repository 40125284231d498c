//! Driving-route client.
//!
//! Queries an OSRM-compatible `route` endpoint for the fastest driving route
//! between two points. Geometry is never requested; only distance and
//! duration are used.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Coordinates, round_to};

use super::error::RouteError;

/// Default base URL for the public OSRM demo server.
const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Distance and duration of a driving route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteSummary {
    /// Distance in kilometers, one decimal place.
    pub distance_km: f64,
    /// Duration in whole minutes.
    pub duration_min: u32,
}

impl RouteSummary {
    /// Build from raw service units (meters, seconds).
    pub fn from_meters_seconds(meters: f64, seconds: f64) -> Self {
        Self {
            distance_km: round_to(meters / 1000.0, 1),
            duration_min: (seconds / 60.0).round().max(0.0) as u32,
        }
    }
}

/// Driving route lookup.
///
/// This abstraction lets the estimator be tested without network access.
pub trait RoutingService: Send + Sync {
    /// Compute the fastest driving route from `origin` to `destination`.
    fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> impl Future<Output = Result<RouteSummary, RouteError>> + Send;
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<RouteItem>,
}

#[derive(Debug, Deserialize)]
struct RouteItem {
    /// Meters
    distance: f64,
    /// Seconds
    duration: f64,
}

/// Parse a route response body into the first route's summary.
fn parse_route_response(body: &str) -> Result<RouteSummary, RouteError> {
    let response: RouteResponse = serde_json::from_str(body).map_err(|e| RouteError::Json {
        message: e.to_string(),
    })?;

    match response.code.as_str() {
        "Ok" => {}
        "NoRoute" | "NoSegment" => return Err(RouteError::NotFound),
        other => {
            return Err(RouteError::Service {
                status: 200,
                message: response.message.unwrap_or_else(|| other.to_string()),
            });
        }
    }

    let route = response.routes.first().ok_or(RouteError::NotFound)?;
    Ok(RouteSummary::from_meters_seconds(
        route.distance,
        route.duration,
    ))
}

/// Configuration for the routing client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Routing profile path segment
    pub profile: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OsrmConfig {
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

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: "driving".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Client for an OSRM-compatible routing API.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
    profile: String,
}

impl OsrmClient {
    /// Create a new routing client.
    pub fn new(config: OsrmConfig) -> Result<Self, RouteError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            profile: config.profile,
        })
    }

    fn route_url(&self, origin: Coordinates, destination: Coordinates) -> String {
        format!(
            "{}/route/v1/{}/{};{}",
            self.base_url,
            self.profile,
            origin.lng_lat(),
            destination.lng_lat()
        )
    }
}

impl RoutingService for OsrmClient {
    async fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<RouteSummary, RouteError> {
        let url = self.route_url(origin, destination);
        debug!(%origin, %destination, "route request");

        let response = self
            .http
            .get(&url)
            .query(&[("overview", "false")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // OSRM reports unroutable input with a 400 and a JSON code
            if let Err(RouteError::NotFound) = parse_route_response(&body) {
                return Err(RouteError::NotFound);
            }
            return Err(RouteError::Service {
                status: status.as_u16(),
                message: body,
            });
        }

        parse_route_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};

    #[test]
    fn config_defaults() {
        let config = OsrmConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.profile, "driving");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn unit_conversion() {
        let summary = RouteSummary::from_meters_seconds(12_345.0, 1_530.0);
        assert_eq!(summary.distance_km, 12.3);
        assert_eq!(summary.duration_min, 26);

        let summary = RouteSummary::from_meters_seconds(10_050.0, 89.0);
        assert_eq!(summary.distance_km, 10.1);
        assert_eq!(summary.duration_min, 1);
    }

    #[test]
    fn url_uses_lng_lat_order() {
        let client = OsrmClient::new(OsrmConfig::default().with_base_url("http://osrm/")).unwrap();
        let url = client.route_url(
            Coordinates::new(-23.55, -46.63),
            Coordinates::new(-22.9, -43.2),
        );
        assert_eq!(url, "http://osrm/route/v1/driving/-46.63,-23.55;-43.2,-22.9");
    }

    #[test]
    fn parses_first_route() {
        let body = r#"{"code":"Ok","routes":[
            {"distance":10000.0,"duration":900.0},
            {"distance":20000.0,"duration":1200.0}
        ]}"#;
        let summary = parse_route_response(body).unwrap();
        assert_eq!(summary.distance_km, 10.0);
        assert_eq!(summary.duration_min, 15);
    }

    #[test]
    fn empty_routes_is_not_found() {
        assert!(matches!(
            parse_route_response(r#"{"code":"Ok","routes":[]}"#),
            Err(RouteError::NotFound)
        ));
        assert!(matches!(
            parse_route_response(r#"{"code":"NoRoute","message":"Impossible route"}"#),
            Err(RouteError::NotFound)
        ));
    }

    #[test]
    fn other_codes_are_service_errors() {
        match parse_route_response(r#"{"code":"TooBig","message":"Too many points"}"#) {
            Err(RouteError::Service { message, .. }) => assert_eq!(message, "Too many points"),
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[test]
    fn garbage_is_json_error() {
        assert!(matches!(
            parse_route_response("<html>"),
            Err(RouteError::Json { .. })
        ));
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn fetches_route_over_http() {
        let app = Router::new().route(
            "/route/v1/driving/:coords",
            get(|Path(coords): Path<String>| async move {
                assert_eq!(coords, "2,1;4,3");
                Json(serde_json::json!({
                    "code": "Ok",
                    "routes": [{"distance": 15_250.0, "duration": 1_410.0}]
                }))
            }),
        );
        let base = serve(app).await;

        let client = OsrmClient::new(OsrmConfig::default().with_base_url(base)).unwrap();
        let summary = client
            .route(Coordinates::new(1.0, 2.0), Coordinates::new(3.0, 4.0))
            .await
            .unwrap();

        assert_eq!(summary.distance_km, 15.3);
        assert_eq!(summary.duration_min, 24);
    }

    #[tokio::test]
    async fn maps_http_failures() {
        let app = Router::new()
            .route(
                "/unroutable/route/v1/driving/:coords",
                get(|| async {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(serde_json::json!({"code": "NoSegment", "message": "x"})),
                    )
                }),
            )
            .route(
                "/down/route/v1/driving/:coords",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
            );
        let base = serve(app).await;
        let (a, b) = (Coordinates::new(1.0, 2.0), Coordinates::new(3.0, 4.0));

        let unroutable = OsrmClient::new(
            OsrmConfig::default().with_base_url(format!("{base}/unroutable")),
        )
        .unwrap();
        assert!(matches!(
            unroutable.route(a, b).await,
            Err(RouteError::NotFound)
        ));

        let down =
            OsrmClient::new(OsrmConfig::default().with_base_url(format!("{base}/down"))).unwrap();
        match down.route(a, b).await {
            Err(RouteError::Service { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }
}
