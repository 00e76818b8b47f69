//! Top-level API error type.

use super::{ClientError, ConfigError, SerializationError};
use thiserror::Error;

/// Top-level error type for every search client call.
///
/// ## Examples
///
/// ```rust,ignore
/// use search_client::ApiError;
///
/// fn handle_error(err: ApiError) {
///     match err {
///         ApiError::Transport(e) => eprintln!("Transport error: {e}"),
///         ApiError::Serialization(e) => eprintln!("Bad payload for {}: {e}", e.type_name()),
///         ApiError::Config(e) => eprintln!("Configuration error: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport failed (network, timeout, non-success status).
    #[error(transparent)]
    Transport(#[from] ClientError),

    /// A body could not be encoded or a response could not be decoded.
    #[error(transparent)]
    Serialization(#[from] SerializationError),

    /// The client or request was misconfigured.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Returns the HTTP status code if the server answered with an error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status_code(),
            _ => None,
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        Self::Config(ConfigError::InvalidUrl(err))
    }
}
