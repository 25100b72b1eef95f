//! Error types for campus-route-sync

use std::io;

use crate::geo::Coordinate;
use crate::polyline::DecodeError;

/// Result type for route engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while resolving, fetching or applying a route
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The user refused location access
    #[error("Location permission denied")]
    PermissionDenied,

    /// Permission was granted but no position fix is available
    #[error("Current location unavailable")]
    LocationUnavailable,

    /// Live location resolved but lies outside the campus geofence
    #[error("Location ({}, {}) is outside the campus bounds", .0.latitude, .0.longitude)]
    OutOfBounds(Coordinate),

    /// Transport failure talking to the directions service (includes timeouts)
    #[error("Network error: {0}")]
    Network(String),

    /// Directions service answered with a non-2xx status
    #[error("HTTP error: status {0}")]
    Http(u16),

    /// Directions service answered but reported no usable route
    #[error("Route not found: {0}")]
    RouteNotFound(String),

    /// Route geometry could not be decoded
    #[error("Polyline decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Response body was not the expected JSON shape
    #[error("Malformed directions response: {0}")]
    MalformedResponse(String),

    /// A symbolic key is missing from the location table
    #[error("Unknown location key: {0}")]
    UnknownLocation(String),

    /// Invalid configuration data
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Returns true for permission and location errors, which callers surface
    /// to the user instead of treating as a failed request.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::PermissionDenied | Error::LocationUnavailable | Error::OutOfBounds(_)
        )
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Error::Config(error.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => Error::Http(status.as_u16()),
            None => Error::Network(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::RouteNotFound("NOT_FOUND".to_string());
        assert_eq!(err.to_string(), "Route not found: NOT_FOUND");
    }

    #[test]
    fn test_http_status_display() {
        let err = Error::Http(503);
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_out_of_bounds_display() {
        let err = Error::OutOfBounds(Coordinate::new(1.5, 2.5));
        assert!(err.to_string().contains("1.5"));
        assert!(err.to_string().contains("2.5"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_decode_error_conversion() {
        let err: Error = DecodeError::Truncated { offset: 3 }.into();
        assert!(matches!(err, Error::Decode(DecodeError::Truncated { offset: 3 })));
    }

    #[test]
    fn test_user_facing() {
        assert!(Error::PermissionDenied.is_user_facing());
        assert!(Error::LocationUnavailable.is_user_facing());
        assert!(!Error::Http(500).is_user_facing());
        assert!(!Error::Network("reset".to_string()).is_user_facing());
    }
}
