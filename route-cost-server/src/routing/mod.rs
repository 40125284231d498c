//! Driving route calculation.
//!
//! Asks an external routing service for the distance and duration between
//! two coordinate pairs. Distances come back in kilometers (one decimal),
//! durations in whole minutes.

mod cache;
mod client;
mod error;

pub use cache::{CachedRouter, RouteCacheConfig};
pub use client::{OsrmClient, OsrmConfig, RouteSummary, RoutingService};
pub use error::RouteError;
