//! Typed dispatch layer for a document-oriented search engine's HTTP API.
//!
//! Every endpoint can be called four ways, and all four must produce the
//! same request:
//!
//! - **Fluent**: a closure that configures a fresh descriptor
//! - **Fluent async**: the same, awaited
//! - **Typed**: a request object built by the caller
//! - **Typed async**: the same, awaited
//!
//! All of them go through one [`Dispatcher`], which resolves the
//! [`Source`], derives [`RequestParameters`], serializes the body, calls the
//! [`Transport`] exactly once and deserializes the typed response.
//!
//! ## Features
//!
//! - **Tagged call sources**: [`Source::Builder`] or [`Source::Typed`], resolved by matching
//! - **Pluggable transport**: [`HttpTransport`] over `reqwest`, or any [`Transport`]
//! - **Layered errors**: transport, serialization and configuration failures stay distinct
//! - **Tracing**: each dispatch is a `api_request` span with OpenTelemetry-style fields
//!
//! ## Example
//!
//! ```rust,ignore
//! use search_client::SearchClient;
//! use url::Url;
//!
//! let client = SearchClient::new(Url::parse("http://localhost:9200")?)?;
//!
//! let response = client
//!     .validate_query_async(|v| v.index("my_index").q("field:value"))
//!     .await?;
//! assert!(response.body().valid);
//! ```

pub mod client;
pub mod dispatcher;
pub mod endpoint;
pub mod endpoints;
pub mod error;
pub mod method;
pub mod params;
pub mod request;
pub mod response;
pub mod transport;

// Re-exports for convenience
pub use client::{SearchClient, SearchClientBuilder};
pub use dispatcher::{Dispatcher, EndpointSource};
pub use endpoint::Endpoint;
pub use error::{ApiError, ClientError, ConfigError, SerializationError};
pub use method::HttpMethod;
pub use params::RequestParameters;
pub use request::{ApiRequest, Resolved, Selector, Source};
pub use response::ApiResponse;
pub use transport::{HttpTransport, PRETTY_PARAM, RawResponse, Transport, resolve_url};
