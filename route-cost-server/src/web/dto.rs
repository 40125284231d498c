//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

/// Query for a single address lookup.
#[derive(Debug, Deserialize)]
pub struct AddressQuery {
    /// Free-text address or `"lat,lng"`
    pub address: String,
}

/// Resolved coordinates.
#[derive(Debug, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

/// Result of an eviction sweep.
#[derive(Debug, Serialize, Deserialize)]
pub struct SweepResponse {
    /// Number of expired entries removed
    pub removed: usize,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Request field the error refers to, when the user can fix it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}
