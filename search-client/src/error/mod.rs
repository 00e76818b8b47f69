//! Layered error types for the search client.
//!
//! - [`ApiError`] - Top-level error returned by every entry point
//! - [`ClientError`] - Transport failures (network, timeout, non-success status)
//! - [`SerializationError`] - Request bodies that cannot be encoded, responses that cannot be decoded
//! - [`ConfigError`] - Invalid URLs, headers, or requests an endpoint cannot route

mod api_error;
mod client_error;
mod config_error;
mod serialization_error;

pub use api_error::ApiError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use serialization_error::SerializationError;
