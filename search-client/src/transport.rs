//! The transport capability.
//!
//! The dispatcher hands a [`Transport`] the resolved [`RequestParameters`]
//! and an optional serialized body, and gets back the raw status, payload
//! and the final URI. Connection pooling, TLS and retries live behind this
//! trait. [`HttpTransport`] is the `reqwest` implementation.

use std::future::Future;
use std::sync::OnceLock;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tracing::debug;
use url::Url;

use crate::error::ClientError;
use crate::method::HttpMethod;
use crate::params::RequestParameters;

/// Query option appended by clients configured for pretty output.
pub const PRETTY_PARAM: (&str, &str) = ("pretty", "true");

/// An HTTP response before deserialization.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw payload.
    pub body: Bytes,
    /// The URI that was actually requested, query string included.
    pub uri: Url,
    /// The method the request was sent with.
    pub method: HttpMethod,
}

/// Sends one request and returns the raw response.
///
/// Implementations make exactly one attempt per call. Non-success statuses
/// are reported as [`ClientError::HttpStatus`].
pub trait Transport: Send + Sync {
    /// Sends a request, blocking the calling thread.
    fn send(
        &self,
        params: &RequestParameters,
        body: Option<Bytes>,
    ) -> Result<RawResponse, ClientError>;

    /// Sends a request asynchronously.
    fn send_async(
        &self,
        params: &RequestParameters,
        body: Option<Bytes>,
    ) -> impl Future<Output = Result<RawResponse, ClientError>> + Send;
}

/// Resolves `params` against `base_url`.
///
/// Path segments are appended to whatever path the base already has and
/// the query options are encoded in key order. With `pretty` set the
/// `pretty=true` flag is appended last.
///
/// ## Errors
///
/// Returns [`ClientError::Connection`] if `base_url` cannot carry a path.
pub fn resolve_url(
    base_url: &Url,
    params: &RequestParameters,
    pretty: bool,
) -> Result<Url, ClientError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| ClientError::Connection(format!("base URL cannot be a base: {base_url}")))?
        .pop_if_empty()
        .extend(params.path_segments());

    if !params.query().is_empty() || pretty {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in params.query() {
            pairs.append_pair(name, value);
        }
        if pretty {
            pairs.append_pair(PRETTY_PARAM.0, PRETTY_PARAM.1);
        }
    }

    Ok(url)
}

/// `reqwest`-backed transport against a single base URL.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    pretty: bool,
    /// Lazily built runtime for blocking calls made outside of tokio.
    blocking_runtime: OnceLock<Runtime>,
}

impl HttpTransport {
    /// Builds a transport.
    ///
    /// ## Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(
        base_url: Url,
        timeout: Duration,
        default_headers: HeaderMap,
        pretty: bool,
    ) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            client,
            base_url,
            timeout,
            pretty,
            blocking_runtime: OnceLock::new(),
        })
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the absolute URL for a call.
    pub fn url_for(&self, params: &RequestParameters) -> Result<Url, ClientError> {
        resolve_url(&self.base_url, params, self.pretty)
    }

    fn blocking_runtime(&self) -> Result<&Runtime, ClientError> {
        if let Some(runtime) = self.blocking_runtime.get() {
            return Ok(runtime);
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ClientError::Runtime(format!("failed to build runtime: {e}")))?;
        Ok(self.blocking_runtime.get_or_init(|| runtime))
    }

    fn map_send_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout {
                duration_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else if err.is_connect() {
            ClientError::Connection(err.to_string())
        } else {
            ClientError::Request(err)
        }
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        params: &RequestParameters,
        body: Option<Bytes>,
    ) -> Result<RawResponse, ClientError> {
        match Handle::try_current() {
            Ok(handle) => {
                if handle.runtime_flavor() == RuntimeFlavor::CurrentThread {
                    return Err(ClientError::Runtime(
                        "blocking calls inside tokio need a multi-thread runtime".to_string(),
                    ));
                }
                tokio::task::block_in_place(|| handle.block_on(self.send_async(params, body)))
            }
            Err(_) => self
                .blocking_runtime()?
                .block_on(self.send_async(params, body)),
        }
    }

    async fn send_async(
        &self,
        params: &RequestParameters,
        body: Option<Bytes>,
    ) -> Result<RawResponse, ClientError> {
        let url = self.url_for(params)?;
        debug!(method = %params.method(), url = %url, has_body = body.is_some(), "sending request");

        let mut request = self.client.request(params.method().to_reqwest(), url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        let uri = response.url().clone();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        Ok(RawResponse {
            status: status.as_u16(),
            body,
            uri,
            method: params.method(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::request::ApiRequest;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Validate {
        body: Option<serde_json::Value>,
    }

    impl ApiRequest for Validate {
        type Body = serde_json::Value;

        fn method(&self) -> HttpMethod {
            if self.body.is_some() {
                HttpMethod::Post
            } else {
                HttpMethod::Get
            }
        }

        fn path_segments(&self) -> Vec<String> {
            vec!["logs".to_string(), "_validate".to_string(), "query".to_string()]
        }

        fn query(&self) -> BTreeMap<String, String> {
            BTreeMap::from([("q".to_string(), "level:error".to_string())])
        }

        fn body(&self) -> Option<&serde_json::Value> {
            self.body.as_ref()
        }
    }

    fn transport_for(server: &MockServer, pretty: bool) -> HttpTransport {
        HttpTransport::new(
            Url::parse(&server.uri()).unwrap(),
            Duration::from_secs(5),
            HeaderMap::new(),
            pretty,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_send_async_get_with_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/logs/_validate/query"))
            .and(query_param("q", "level:error"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"valid":true}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server, true);
        let params = RequestParameters::from_request(&Validate { body: None });

        let raw = transport.send_async(&params, None).await.unwrap();
        assert_eq!(raw.status, 200);
        assert_eq!(raw.method, HttpMethod::Get);
        assert_eq!(raw.body.as_ref(), br#"{"valid":true}"#);
        assert_eq!(raw.uri.path(), "/logs/_validate/query");
        assert_eq!(raw.uri.query(), Some("q=level%3Aerror&pretty=true"));
    }

    #[tokio::test]
    async fn test_send_async_post_body() {
        let mock_server = MockServer::start().await;
        let query = serde_json::json!({"query": {"match_all": {}}});

        Mock::given(method("POST"))
            .and(path("/logs/_validate/query"))
            .and(body_json(&query))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"valid":true}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server, false);
        let request = Validate {
            body: Some(query.clone()),
        };
        let params = RequestParameters::from_request(&request);
        let body = Bytes::from(serde_json::to_vec(&query).unwrap());

        let raw = transport.send_async(&params, Some(body)).await.unwrap();
        assert_eq!(raw.method, HttpMethod::Post);
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("index_not_found_exception"))
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server, false);
        let params = RequestParameters::from_request(&Validate { body: None });

        let err = transport.send_async(&params, None).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::HttpStatus { status: 404, ref message } if message == "index_not_found_exception"
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_blocking_send_inside_multi_thread_runtime() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/logs/_validate/query"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"valid":true}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server, false);
        let params = RequestParameters::from_request(&Validate { body: None });

        let raw = transport.send(&params, None).unwrap();
        assert_eq!(raw.status, 200);
    }

    #[tokio::test]
    async fn test_blocking_send_on_current_thread_runtime_is_an_error() {
        let mock_server = MockServer::start().await;
        let transport = transport_for(&mock_server, false);
        let params = RequestParameters::from_request(&Validate { body: None });

        let err = transport.send(&params, None).unwrap_err();
        assert!(matches!(err, ClientError::Runtime(_)));
    }
}
