//! Typed responses.

use url::Url;

use crate::method::HttpMethod;

/// A deserialized response together with the details of the call that
/// produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    body: T,
    status: u16,
    uri: Url,
    method: HttpMethod,
}

impl<T> ApiResponse<T> {
    /// Creates a response from its parts.
    pub fn new(body: T, status: u16, uri: Url, method: HttpMethod) -> Self {
        Self {
            body,
            status,
            uri,
            method,
        }
    }

    /// Returns the typed body.
    pub fn body(&self) -> &T {
        &self.body
    }

    /// Returns the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the URI the transport actually sent, query string included.
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// Returns the HTTP method the call was sent with.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Consumes the response, returning the typed body.
    pub fn into_body(self) -> T {
        self.body
    }
}
