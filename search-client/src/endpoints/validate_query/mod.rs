//! `indices.validate_query`: checks a query without executing it.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use search_client::endpoints::validate_query::ValidateQueryRequest;
//!
//! // Fluent
//! let fluent = client.validate_query(|v| v.index("logs").q("level:error"))?;
//!
//! // Typed
//! let mut request = ValidateQueryRequest::for_indices(["logs"]);
//! request.options.q = Some("level:error".to_string());
//! let typed = client.validate_query_request(request)?;
//!
//! assert_eq!(fluent.body(), typed.body());
//! ```

mod descriptor;
mod options;
mod request;
mod response;

pub use descriptor::ValidateQueryDescriptor;
pub use options::{DefaultOperator, ValidateQueryBody, ValidateQueryOptions};
pub use request::ValidateQueryRequest;
pub use response::{QueryExplanation, ShardStatistics, ValidateQueryResponse};

use crate::client::SearchClient;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::method::HttpMethod;
use crate::request::Source;
use crate::response::ApiResponse;
use crate::transport::Transport;

/// Marker type routing validate-query calls.
#[derive(Debug, Clone, Copy)]
pub struct ValidateQuery;

impl Endpoint for ValidateQuery {
    const ID: &'static str = "indices.validate_query";
    const ALLOWED_METHODS: &'static [HttpMethod] = &[HttpMethod::Get, HttpMethod::Post];

    type Body = ValidateQueryBody;
    type Descriptor = ValidateQueryDescriptor;
    type Request = ValidateQueryRequest;
    type Response = ValidateQueryResponse;
}

/// Result of any validate-query entry point.
pub type ValidateQueryResult = Result<ApiResponse<ValidateQueryResponse>, ApiError>;

impl<T: Transport> SearchClient<T> {
    /// Validates a query described by a fluent selector.
    ///
    /// ## Errors
    ///
    /// Returns an error if the request cannot be sent or the response cannot
    /// be parsed.
    pub fn validate_query<F>(&self, selector: F) -> ValidateQueryResult
    where
        F: FnOnce(ValidateQueryDescriptor) -> ValidateQueryDescriptor + Send,
    {
        self.dispatcher()
            .dispatch::<ValidateQuery>(Source::builder(selector))
    }

    /// Async variant of [`validate_query`](Self::validate_query).
    ///
    /// ## Errors
    ///
    /// Same conditions as [`validate_query`](Self::validate_query).
    pub async fn validate_query_async<F>(&self, selector: F) -> ValidateQueryResult
    where
        F: FnOnce(ValidateQueryDescriptor) -> ValidateQueryDescriptor + Send,
    {
        self.dispatcher()
            .dispatch_async::<ValidateQuery>(Source::builder(selector))
            .await
    }

    /// Validates a query described by a typed request.
    ///
    /// ## Errors
    ///
    /// Same conditions as [`validate_query`](Self::validate_query).
    pub fn validate_query_request(&self, request: ValidateQueryRequest) -> ValidateQueryResult {
        self.dispatcher()
            .dispatch::<ValidateQuery>(Source::typed(request))
    }

    /// Async variant of [`validate_query_request`](Self::validate_query_request).
    ///
    /// ## Errors
    ///
    /// Same conditions as [`validate_query`](Self::validate_query).
    pub async fn validate_query_request_async(
        &self,
        request: ValidateQueryRequest,
    ) -> ValidateQueryResult {
        self.dispatcher()
            .dispatch_async::<ValidateQuery>(Source::typed(request))
            .await
    }
}

/// Path segments shared by the descriptor and the typed request.
fn path_segments(indices: &[String]) -> Vec<String> {
    let mut segments = Vec::with_capacity(3);
    if !indices.is_empty() {
        segments.push(indices.join(","));
    }
    segments.push("_validate".to_string());
    segments.push("query".to_string());
    segments
}

/// A query in the body means POST, otherwise everything fits in the URL.
fn method_for(body: &ValidateQueryBody) -> HttpMethod {
    if body.is_empty() {
        HttpMethod::Get
    } else {
        HttpMethod::Post
    }
}
