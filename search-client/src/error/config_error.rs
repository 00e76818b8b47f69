//! Client configuration and routing errors.

use thiserror::Error;

use crate::method::HttpMethod;

/// Errors in client configuration or in a request an endpoint cannot route.
///
/// These indicate programmer errors rather than server or network failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A default header name or value was rejected.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The endpoint has no route for the requested HTTP method.
    #[error("Endpoint {endpoint} does not support {method}")]
    UnsupportedMethod {
        /// The endpoint identifier.
        endpoint: &'static str,
        /// The rejected method.
        method: HttpMethod,
    },

    /// A value the endpoint's path needs was not provided.
    #[error("Endpoint {endpoint} requires route value {name}")]
    MissingRouteValue {
        /// The endpoint identifier.
        endpoint: &'static str,
        /// The missing route value.
        name: &'static str,
    },
}
