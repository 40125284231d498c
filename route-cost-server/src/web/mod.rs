//! Web layer for the route cost estimator.
//!
//! Provides JSON endpoints for cost estimates, address lookups and geocode
//! cache maintenance.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, LiveEstimator};
