//! Per-call request parameters.
//!
//! [`RequestParameters`] is the fully resolved shape of one API call: the
//! HTTP method, the path segments and the query options. It is always
//! derived from exactly one resolved request object, never merged from two.

use std::collections::BTreeMap;

use crate::method::HttpMethod;
use crate::request::ApiRequest;

/// The resolved method, path and query string of a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameters {
    method: HttpMethod,
    path_segments: Vec<String>,
    query: BTreeMap<String, String>,
}

impl RequestParameters {
    /// Derives parameters from a resolved descriptor or typed request.
    pub fn from_request<R: ApiRequest + ?Sized>(request: &R) -> Self {
        Self {
            method: request.method(),
            path_segments: request.path_segments(),
            query: request.query(),
        }
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the path segments in order.
    pub fn path_segments(&self) -> &[String] {
        &self.path_segments
    }

    /// Returns the query options, sorted by name.
    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// Returns the path, raw segments joined by `/` without a leading slash.
    ///
    /// Segments are not encoded here; [`resolve_url`](crate::resolve_url)
    /// percent-encodes each one when building the request URL.
    pub fn path(&self) -> String {
        self.path_segments.join("/")
    }

    /// Returns the query string without a leading `?`, keys in sorted order.
    ///
    /// Values are written verbatim; the transport takes care of encoding.
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Adds or replaces a query option.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }
}
