//! Monthly route cost estimation.
//!
//! Combines geocoding and routing into a fuel-cost projection for a
//! vehicle's primary commute plus optional extra trips, with a safety
//! margin and an optional comparison against a spending limit.

mod config;
mod error;
mod estimator;
mod model;

pub use config::EstimatorConfig;
pub use error::{Endpoint, EstimateError};
pub use estimator::CostEstimator;
pub use model::{
    AdditionalTrip, CostEstimate, EstimateRequest, LegOutcome, LimitComparison, RouteLeg,
    SkippedTrip, VehicleConfig,
};
