//! HTTP methods understood by the search API.

use strum::{Display, EnumIter, EnumString};

/// HTTP methods a search endpoint can be called with.
///
/// ## Examples
///
/// ```rust
/// use search_client::HttpMethod;
///
/// let method = HttpMethod::Get;
/// assert!(!method.has_body());
/// assert!(method.is_safe());
///
/// let parsed: HttpMethod = "POST".parse().unwrap();
/// assert_eq!(parsed, HttpMethod::Post);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Read a resource, query options travel in the URL.
    Get,
    /// Send a request body, used by search-style endpoints that take a query.
    Post,
    /// Create or replace a resource.
    Put,
    /// Remove a resource.
    Delete,
    /// Existence checks, headers only.
    Head,
}

impl HttpMethod {
    /// Returns `true` if requests with this method may carry a body.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }

    /// Returns `true` if this method does not modify server state.
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Get | Self::Head)
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
            Self::Head => reqwest::Method::HEAD,
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        method.to_reqwest()
    }
}
