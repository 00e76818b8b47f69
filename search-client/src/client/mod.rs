//! The search client.
//!
//! [`SearchClient`] owns a [`Dispatcher`] over a [`Transport`]. Endpoint
//! modules add their call surfaces as inherent methods, see
//! [`crate::endpoints`].
//!
//! ## Examples
//!
//! ```rust,ignore
//! use search_client::SearchClient;
//! use url::Url;
//!
//! let client = SearchClient::builder(Url::parse("http://localhost:9200")?)
//!     .pretty_json(true)
//!     .build()?;
//!
//! let response = client.validate_query(|v| v.index("logs").q("level:error"))?;
//! assert!(response.body().valid);
//! ```

mod builder;

pub use builder::SearchClientBuilder;

use url::Url;

use crate::dispatcher::Dispatcher;
use crate::error::ApiError;
use crate::transport::{HttpTransport, Transport};

/// Typed client for the search API.
///
/// Generic over the transport so tests can swap the network for an
/// in-memory implementation.
#[derive(Debug)]
pub struct SearchClient<T = HttpTransport> {
    dispatcher: Dispatcher<T>,
}

impl SearchClient<HttpTransport> {
    /// Creates a new builder for a client talking to `base_url`.
    pub fn builder(base_url: Url) -> SearchClientBuilder {
        SearchClientBuilder::new(base_url)
    }

    /// Creates a client with default settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        Self::builder(base_url).build()
    }
}

impl<T: Transport> SearchClient<T> {
    /// Creates a client over an existing transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            dispatcher: Dispatcher::new(transport),
        }
    }

    /// Returns the dispatcher every endpoint call goes through.
    pub fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        self.dispatcher.transport()
    }
}
