//! A network-free transport and cluster.
//!
//! [`InMemoryTransport`] answers every request with the same fixture payload
//! and records what it was asked, which is enough to exercise the whole
//! four-variant flow without a running cluster.

use std::sync::{Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use search_client::{
    ApiError, ClientError, RawResponse, RequestParameters, SearchClient, Transport, resolve_url,
};
use url::Url;

use crate::cluster::{ConfigureClient, IntegrationCluster};

/// One request seen by an [`InMemoryTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Parameters as the dispatcher produced them.
    pub params: RequestParameters,
    /// Serialized body, if any.
    pub body: Option<Bytes>,
    /// The URI the request would have hit.
    pub uri: Url,
}

/// Transport that answers from a fixture.
#[derive(Debug)]
pub struct InMemoryTransport {
    base_url: Url,
    status: u16,
    fixture: Bytes,
    pretty: bool,
    calls: Mutex<Vec<RecordedCall>>,
}

impl InMemoryTransport {
    /// Answers every request with `200` and `fixture`.
    pub fn new(base_url: Url, fixture: impl Into<Bytes>) -> Self {
        Self {
            base_url,
            status: 200,
            fixture: fixture.into(),
            pretty: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers with `status` instead. Statuses of 400 and above fail.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Appends `pretty=true` to recorded URIs.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Returns every request received so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().clone()
    }

    /// Returns how many requests were received.
    pub fn call_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn answer(
        &self,
        params: &RequestParameters,
        body: Option<Bytes>,
    ) -> Result<RawResponse, ClientError> {
        let uri = resolve_url(&self.base_url, params, self.pretty)?;
        self.lock().push(RecordedCall {
            params: params.clone(),
            body,
            uri: uri.clone(),
        });

        if self.status >= 400 {
            return Err(ClientError::HttpStatus {
                status: self.status,
                message: String::from_utf8_lossy(&self.fixture).into_owned(),
            });
        }

        Ok(RawResponse {
            status: self.status,
            body: self.fixture.clone(),
            uri,
            method: params.method(),
        })
    }
}

impl Transport for InMemoryTransport {
    fn send(
        &self,
        params: &RequestParameters,
        body: Option<Bytes>,
    ) -> Result<RawResponse, ClientError> {
        self.answer(params, body)
    }

    async fn send_async(
        &self,
        params: &RequestParameters,
        body: Option<Bytes>,
    ) -> Result<RawResponse, ClientError> {
        self.answer(params, body)
    }
}

/// A pretend cluster whose clients use an [`InMemoryTransport`].
#[derive(Debug, Clone)]
pub struct InMemoryCluster {
    port: u16,
    status: u16,
    fixture: Bytes,
}

impl InMemoryCluster {
    /// Clients will answer every request with `fixture`.
    pub fn new(port: u16, fixture: impl Into<Bytes>) -> Self {
        Self {
            port,
            status: 200,
            fixture: fixture.into(),
        }
    }

    /// Clients will answer with `status`.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }
}

impl IntegrationCluster for InMemoryCluster {
    type Transport = InMemoryTransport;

    fn port(&self) -> u16 {
        self.port
    }

    /// Only the base URL and the pretty flag of the configured builder
    /// apply; there is no connection to tune.
    fn client(
        &self,
        configure: ConfigureClient<'_>,
    ) -> Result<SearchClient<InMemoryTransport>, ApiError> {
        let base_url = Url::parse(&format!("http://localhost:{}", self.port))?;
        let builder = configure(SearchClient::builder(base_url));
        let transport = InMemoryTransport::new(builder.base_url().clone(), self.fixture.clone())
            .with_status(self.status)
            .with_pretty(builder.is_pretty_json());
        Ok(SearchClient::with_transport(transport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_client::endpoints::validate_query::ValidateQueryRequest;
    use search_client::HttpMethod;

    const VALID: &str = r#"{"valid":true,"_shards":{"total":1,"successful":1,"failed":0}}"#;

    #[test]
    fn test_records_calls_and_answers_fixture() {
        let client = InMemoryCluster::new(9200, VALID)
            .client(&|builder| builder)
            .unwrap();

        let response = client
            .validate_query(|v| v.index("my_index").q("field:value"))
            .unwrap();

        assert!(response.body().valid);
        assert_eq!(response.method(), HttpMethod::Get);

        let calls = client.transport().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].params.path(), "my_index/_validate/query");
        assert_eq!(calls[0].uri.query(), Some("q=field%3Avalue"));
    }

    #[tokio::test]
    async fn test_pretty_setting_reaches_uri() {
        let client = InMemoryCluster::new(9200, VALID)
            .client(&|builder| builder.pretty_json(true))
            .unwrap();

        let response = client
            .validate_query_request_async(ValidateQueryRequest::for_indices(["logs"]))
            .await
            .unwrap();

        assert_eq!(response.uri().query(), Some("pretty=true"));
    }

    #[test]
    fn test_error_status_fails_and_is_recorded() {
        let client = InMemoryCluster::new(9200, "boom")
            .with_status(500)
            .client(&|builder| builder)
            .unwrap();

        let err = client.validate_query(|v| v).unwrap_err();

        assert_eq!(err.status_code(), Some(500));
        assert_eq!(client.transport().call_count(), 1);
    }
}
