//! Client configuration.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use super::SearchClient;
use crate::error::{ApiError, ConfigError};
use crate::transport::HttpTransport;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Builder for configuring a [`SearchClient`].
#[derive(Debug)]
pub struct SearchClientBuilder {
    base_url: Url,
    timeout: Duration,
    default_headers: HeaderMap,
    pretty: bool,
}

impl SearchClientBuilder {
    /// Creates a new builder with the specified base URL.
    pub(super) fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
            pretty: false,
        }
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns `true` if requests will carry `pretty=true`.
    pub fn is_pretty_json(&self) -> bool {
        self.pretty
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Asks the server for indented JSON by appending `pretty=true` to every
    /// request.
    pub fn pretty_json(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Adds a default header to all requests.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// let client = SearchClient::builder(base_url)
    ///     .default_header("X-Opaque-Id", "validate-query-tests")?
    ///     .build()?;
    /// ```
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ApiError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::InvalidHeader(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::InvalidHeader(format!("invalid header value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Builds the [`HttpTransport`] this configuration describes.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build_transport(self) -> Result<HttpTransport, ApiError> {
        let transport =
            HttpTransport::new(self.base_url, self.timeout, self.default_headers, self.pretty)?;
        Ok(transport)
    }

    /// Builds the [`SearchClient`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<SearchClient, ApiError> {
        Ok(SearchClient::with_transport(self.build_transport()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RequestParameters;
    use crate::request::ApiRequest;
    use crate::HttpMethod;
    use std::collections::BTreeMap;

    struct Health;

    impl ApiRequest for Health {
        type Body = ();

        fn method(&self) -> HttpMethod {
            HttpMethod::Get
        }

        fn path_segments(&self) -> Vec<String> {
            vec!["_cluster".to_string(), "health".to_string()]
        }

        fn query(&self) -> BTreeMap<String, String> {
            BTreeMap::from([("level".to_string(), "indices".to_string())])
        }

        fn body(&self) -> Option<&()> {
            None
        }
    }

    #[test]
    fn test_pretty_json_appends_flag() {
        let transport = SearchClient::builder(Url::parse("http://localhost:9200").unwrap())
            .pretty_json(true)
            .build_transport()
            .unwrap();

        let url = transport
            .url_for(&RequestParameters::from_request(&Health))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:9200/_cluster/health?level=indices&pretty=true"
        );
    }

    #[test]
    fn test_base_path_is_preserved() {
        let transport = SearchClient::builder(Url::parse("http://localhost:9200/proxy/").unwrap())
            .build_transport()
            .unwrap();

        let url = transport
            .url_for(&RequestParameters::from_request(&Health))
            .unwrap();
        assert_eq!(url.path(), "/proxy/_cluster/health");
    }

    #[test]
    fn test_invalid_default_header() {
        let result = SearchClient::builder(Url::parse("http://localhost:9200").unwrap())
            .default_header("bad header", "value");
        assert!(matches!(
            result,
            Err(ApiError::Config(ConfigError::InvalidHeader(_)))
        ));
    }

    #[test]
    fn test_custom_timeout() {
        let client = SearchClient::builder(Url::parse("http://localhost:9200").unwrap())
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap();
        assert_eq!(client.transport().base_url().as_str(), "http://localhost:9200/");
    }
}
