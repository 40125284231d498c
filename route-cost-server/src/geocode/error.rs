//! Geocoding error types.

use std::path::PathBuf;

/// Errors that can occur when turning an address into coordinates.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// The geocoding service returned no candidates
    #[error("address not found: {address}")]
    NotFound { address: String },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the geocoding service
    #[error("rate limited by geocoding service")]
    RateLimited,

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

impl GeocodeError {
    /// Whether this error means the address itself could not be located,
    /// as opposed to the service being unavailable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GeocodeError::NotFound { .. })
    }
}

/// Errors from the local key-value store backing the geocode cache.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A previous writer panicked while holding the lock
    #[error("store lock poisoned")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeocodeError::NotFound {
            address: "Rua Inexistente, 0".into(),
        };
        assert_eq!(err.to_string(), "address not found: Rua Inexistente, 0");
        assert!(err.is_not_found());

        let err = GeocodeError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");
        assert!(!err.is_not_found());

        let err = StoreError::Poisoned;
        assert_eq!(err.to_string(), "store lock poisoned");
    }
}
