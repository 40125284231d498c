//! Estimation error types.

use std::fmt;

use crate::geocode::GeocodeError;
use crate::routing::RouteError;

/// Which mandatory endpoint of the primary route failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Base,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Base => f.write_str("base address"),
            Endpoint::Destination => f.write_str("destination address"),
        }
    }
}

/// Errors that abort a cost estimate.
///
/// Failures on additional trips never appear here; those trips are skipped.
#[derive(Debug, thiserror::Error)]
pub enum EstimateError {
    /// Fuel consumption rate missing or not positive
    #[error("invalid vehicle configuration: {0}")]
    InvalidVehicleConfig(String),

    /// A numeric input is negative or not finite
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The base address could not be geocoded
    #[error("base address could not be found: {address}")]
    BaseAddressNotFound { address: String },

    /// The primary destination could not be geocoded
    #[error("destination address could not be found: {address}")]
    DestinationNotFound { address: String },

    /// The geocoding service failed while resolving a mandatory endpoint
    #[error("failed to geocode {endpoint}: {source}")]
    Geocoding {
        endpoint: Endpoint,
        #[source]
        source: GeocodeError,
    },

    /// The primary route could not be calculated
    #[error("failed to calculate primary route: {0}")]
    Route(#[from] RouteError),
}

impl EstimateError {
    /// Attach the failing endpoint to a geocoding error.
    pub(crate) fn from_geocode(endpoint: Endpoint, address: &str, err: GeocodeError) -> Self {
        match (endpoint, err) {
            (Endpoint::Base, GeocodeError::NotFound { .. }) => EstimateError::BaseAddressNotFound {
                address: address.to_string(),
            },
            (Endpoint::Destination, GeocodeError::NotFound { .. }) => {
                EstimateError::DestinationNotFound {
                    address: address.to_string(),
                }
            }
            (endpoint, source) => EstimateError::Geocoding { endpoint, source },
        }
    }

    /// Whether the caller can fix this by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EstimateError::InvalidVehicleConfig(_)
                | EstimateError::InvalidInput(_)
                | EstimateError::BaseAddressNotFound { .. }
                | EstimateError::DestinationNotFound { .. }
        )
    }
}
