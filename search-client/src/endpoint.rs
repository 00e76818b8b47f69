//! Per-endpoint routing.
//!
//! An [`Endpoint`] ties together the descriptor, typed request and response
//! types of one API call and knows how to turn resolved
//! [`RequestParameters`] into the concrete call the transport will make.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ConfigError;
use crate::method::HttpMethod;
use crate::params::RequestParameters;
use crate::request::ApiRequest;

/// Static description of one API endpoint.
pub trait Endpoint {
    /// Stable identifier, used in logs and errors.
    const ID: &'static str;

    /// Methods this endpoint can be routed with.
    const ALLOWED_METHODS: &'static [HttpMethod];

    /// Request body type shared by the descriptor and the typed request.
    type Body: Serialize;

    /// The fluent builder.
    type Descriptor: ApiRequest<Body = Self::Body> + Default + Send;

    /// The strongly-typed request.
    type Request: ApiRequest<Body = Self::Body> + Send;

    /// The typed response body.
    type Response: DeserializeOwned + Send;

    /// Turns resolved parameters into the parameters actually sent.
    ///
    /// The default rejects methods outside [`ALLOWED_METHODS`](Self::ALLOWED_METHODS)
    /// and an empty path.
    fn route(params: RequestParameters) -> Result<RequestParameters, ConfigError> {
        if !Self::ALLOWED_METHODS.contains(&params.method()) {
            return Err(ConfigError::UnsupportedMethod {
                endpoint: Self::ID,
                method: params.method(),
            });
        }
        if params.path_segments().is_empty() {
            return Err(ConfigError::MissingRouteValue {
                endpoint: Self::ID,
                name: "path",
            });
        }
        Ok(params)
    }
}
