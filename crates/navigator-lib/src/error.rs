use std::time::Duration;

use thiserror::Error;

use crate::location::LocationId;

/// Convenient result alias for the Navigator library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a caller passes an identifier that cannot name a location.
    #[error("invalid location id {id}; location ids must be positive")]
    InvalidLocation { id: LocationId },

    /// Raised when the name service has no entry for the requested id.
    #[error("no name known for location {id}")]
    NameNotFound { id: LocationId },

    /// Raised when the route service answered with something other than a path.
    #[error("route service failed for {from} -> {to}: {message}")]
    RouteService {
        from: LocationId,
        to: LocationId,
        message: String,
    },

    /// Raised when a collaborator call exceeded its configured limit.
    #[error("{operation} timed out after {limit:?}")]
    Timeout {
        operation: &'static str,
        limit: Duration,
    },

    /// Raised when an environment variable holds an unusable value.
    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: String, value: String },

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Whether the error came from an external collaborator and would be
    /// absorbed by the cache rather than surfaced to its caller.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::NameNotFound { .. }
                | Error::RouteService { .. }
                | Error::Timeout { .. }
                | Error::Http(_)
        )
    }

    /// Short, stable label used for metrics.
    pub(crate) fn reason(&self) -> &'static str {
        match self {
            Error::InvalidLocation { .. } => "invalid_location",
            Error::NameNotFound { .. } => "name_not_found",
            Error::RouteService { .. } => "route_service",
            Error::Timeout { .. } => "timeout",
            Error::InvalidConfig { .. } => "invalid_config",
            Error::Http(_) => "http",
        }
    }
}
