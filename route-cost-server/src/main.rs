use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use route_cost_server::config::ServerConfig;
use route_cost_server::estimate::{CostEstimator, EstimatorConfig};
use route_cost_server::geocode::{FileStore, Geocoder, NominatimClient};
use route_cost_server::routing::{CachedRouter, OsrmClient, RouteCacheConfig};
use route_cost_server::web::{AppState, LiveEstimator, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    // Geocoding: Nominatim behind the on-disk cache and the shared throttle
    let nominatim = NominatimClient::new(config.nominatim())?;
    let store = FileStore::new(config.cache_dir.clone());
    let geocoder = Geocoder::new(nominatim, store);
    info!(
        cache_dir = %config.cache_dir.display(),
        cached = geocoder.cache_stats().count,
        "geocode cache loaded"
    );

    // Routing: OSRM behind an in-memory route cache
    let osrm = OsrmClient::new(config.osrm())?;
    let router = CachedRouter::new(osrm, &RouteCacheConfig::default());

    let estimator: LiveEstimator = CostEstimator::new(geocoder, router, EstimatorConfig::default());
    let app = create_router(AppState::new(estimator));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "route cost server listening");
    info!("  GET    /health        - Health check");
    info!("  POST   /estimate      - Monthly route cost estimate");
    info!("  GET    /geocode       - Resolve an address");
    info!("  GET    /cache/stats   - Geocode cache statistics");
    info!("  POST   /cache/sweep   - Remove expired cache entries");
    info!("  DELETE /cache         - Evict one address");

    axum::serve(listener, app).await?;
    Ok(())
}
