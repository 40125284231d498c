//! Routing error types.

/// Errors from the routing service.
///
/// None of these point at a field the user can fix, so they all surface as
/// a generic "try again" message.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The service found no drivable route between the points
    #[error("no route found between the given points")]
    NotFound,

    /// The service answered with an error status or code
    #[error("routing service error {status}: {message}")]
    Service { status: u16, message: String },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

impl RouteError {
    /// Message suitable for showing to an end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            RouteError::NotFound => "no route could be found between these addresses",
            _ => "the route could not be calculated, please try again",
        }
    }
}
