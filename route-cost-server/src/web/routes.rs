//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::estimate::{CostEstimate, EstimateError, EstimateRequest};
use crate::geocode::{
    AddressResolver, CacheStats, GeocodeError, GeocodingService, KeyValueStore,
};
use crate::routing::RoutingService;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<S, K, R>(state: AppState<S, K, R>) -> Router
where
    S: GeocodingService + 'static,
    K: KeyValueStore + 'static,
    R: RoutingService + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/estimate", post(estimate::<S, K, R>))
        .route("/geocode", get(geocode::<S, K, R>))
        .route("/cache", axum::routing::delete(evict_address::<S, K, R>))
        .route("/cache/stats", get(cache_stats::<S, K, R>))
        .route("/cache/sweep", post(sweep_cache::<S, K, R>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Produce a monthly route cost estimate.
async fn estimate<S, K, R>(
    State(state): State<AppState<S, K, R>>,
    body: Bytes,
) -> Result<Json<CostEstimate>, AppError>
where
    S: GeocodingService,
    K: KeyValueStore,
    R: RoutingService,
{
    // Parse JSON manually so we can log the body on failure
    let req: EstimateRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid estimate request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let estimate = state.estimator.estimate(&req).await?;
    Ok(Json(estimate))
}

/// Resolve a single address.
async fn geocode<S, K, R>(
    State(state): State<AppState<S, K, R>>,
    Query(query): Query<AddressQuery>,
) -> Result<Json<GeocodeResponse>, AppError>
where
    S: GeocodingService,
    K: KeyValueStore,
    R: RoutingService,
{
    let coords = state.estimator.resolver().resolve(&query.address).await?;

    Ok(Json(GeocodeResponse {
        address: query.address,
        lat: coords.lat,
        lng: coords.lng,
    }))
}

/// Geocode cache statistics.
async fn cache_stats<S, K, R>(State(state): State<AppState<S, K, R>>) -> Json<CacheStats>
where
    S: GeocodingService,
    K: KeyValueStore,
    R: RoutingService,
{
    Json(state.estimator.resolver().cache_stats())
}

/// Remove expired geocode cache entries.
async fn sweep_cache<S, K, R>(State(state): State<AppState<S, K, R>>) -> Json<SweepResponse>
where
    S: GeocodingService,
    K: KeyValueStore,
    R: RoutingService,
{
    let removed = state.estimator.resolver().cache().sweep_expired();
    Json(SweepResponse { removed })
}

/// Evict one address from the geocode cache.
async fn evict_address<S, K, R>(
    State(state): State<AppState<S, K, R>>,
    Query(query): Query<AddressQuery>,
) -> StatusCode
where
    S: GeocodingService,
    K: KeyValueStore,
    R: RoutingService,
{
    state.estimator.resolver().cache().remove(&query.address);
    StatusCode::NO_CONTENT
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unprocessable { message: String, field: &'static str },
    BadGateway { message: String },
}

impl From<EstimateError> for AppError {
    fn from(e: EstimateError) -> Self {
        let message = e.to_string();

        if !e.is_client_error() {
            let message = match &e {
                EstimateError::Route(route) => route.user_message().to_string(),
                _ => format!("{message}; please try again"),
            };
            return AppError::BadGateway { message };
        }

        match e {
            EstimateError::InvalidVehicleConfig(_) => AppError::Unprocessable {
                message,
                field: "vehicle",
            },
            EstimateError::BaseAddressNotFound { .. } => AppError::Unprocessable {
                message,
                field: "base_address",
            },
            EstimateError::DestinationNotFound { .. } => AppError::Unprocessable {
                message,
                field: "primary_destination",
            },
            _ => AppError::BadRequest { message },
        }
    }
}

impl From<GeocodeError> for AppError {
    fn from(e: GeocodeError) -> Self {
        if e.is_not_found() {
            AppError::NotFound {
                message: e.to_string(),
            }
        } else {
            AppError::BadGateway {
                message: e.to_string(),
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, field) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message, None),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message, None),
            AppError::Unprocessable { message, field } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message, Some(field))
            }
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message, None),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse {
            error: message,
            field: field.map(str::to_string),
        });
        (status, body).into_response()
    }
}
