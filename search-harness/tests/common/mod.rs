//! A validate-query endpoint test shared by the integration tests.
//!
//! It records which hooks ran, in order, and can be told to fail a variant
//! from its before-call hook, to target a per-variant index, or to send a
//! query body.

#![allow(dead_code)]

use std::marker::PhantomData;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use search_client::endpoints::validate_query::{
    ValidateQuery, ValidateQueryDescriptor, ValidateQueryRequest,
};
use search_client::{ApiError, ClientError, HttpMethod, SearchClient, Selector, Transport};
use search_harness::{ApiTest, CallResult, CallUniqueValues, CallVariant};
use serde_json::Value;

/// Payload every mocked validate-query call answers with.
pub const FIXTURE: &str = r#"{"valid":true,"_shards":{"total":1,"successful":1,"failed":0}}"#;

/// Expected URL of every variant.
pub const URL_PATH: &str = "my_index/_validate/query?q=field:value";

/// Validates `field:value` against `my_index`.
pub struct ValidateQueryTest<T> {
    pub setups: AtomicUsize,
    pub log: Mutex<Vec<String>>,
    pub fail_on: Option<CallVariant>,
    pub isolated_index: bool,
    pub query: Option<Value>,
    pub typed_query: Option<Value>,
    _transport: PhantomData<fn() -> T>,
}

impl<T> ValidateQueryTest<T> {
    pub fn new() -> Self {
        Self {
            setups: AtomicUsize::new(0),
            log: Mutex::new(Vec::new()),
            fail_on: None,
            isolated_index: false,
            query: None,
            typed_query: None,
            _transport: PhantomData,
        }
    }

    pub fn failing_on(variant: CallVariant) -> Self {
        Self {
            fail_on: Some(variant),
            ..Self::new()
        }
    }

    /// Each variant validates against its own generated index name.
    pub fn with_isolated_index() -> Self {
        Self {
            isolated_index: true,
            ..Self::new()
        }
    }

    /// Both the fluent and the typed call send `query` as the body.
    pub fn with_query(query: Value) -> Self {
        Self {
            query: Some(query.clone()),
            typed_query: Some(query),
            ..Self::new()
        }
    }

    /// Only the typed call's body is replaced.
    pub fn with_typed_query(mut self, query: Value) -> Self {
        self.typed_query = Some(query);
        self
    }

    fn index(&self, values: &CallUniqueValues) -> String {
        if self.isolated_index {
            values.isolated_value("index")
        } else {
            "my_index".to_string()
        }
    }

    pub fn setups(&self) -> usize {
        self.setups.load(Ordering::SeqCst)
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }
}

impl<T: Transport + 'static> ApiTest for ValidateQueryTest<T> {
    type Endpoint = ValidateQuery;
    type Transport = T;

    fn url_path(&self, values: &CallUniqueValues) -> String {
        URL_PATH.replace("my_index", &self.index(values))
    }

    fn http_method(&self) -> HttpMethod {
        if self.query.is_some() {
            HttpMethod::Post
        } else {
            HttpMethod::Get
        }
    }

    fn fluent(&self, values: &CallUniqueValues) -> Selector<'static, ValidateQueryDescriptor> {
        let index = self.index(values);
        let query = self.query.clone();
        Box::new(move |v: ValidateQueryDescriptor| {
            let v = v.index(index).q("field:value");
            match query {
                Some(query) => v.query(query),
                None => v,
            }
        })
    }

    fn initializer(&self, values: &CallUniqueValues) -> ValidateQueryRequest {
        let mut request = ValidateQueryRequest::for_indices([self.index(values)]);
        request.options.q = Some("field:value".to_string());
        request.body.query = self.typed_query.clone();
        request
    }

    fn call_fluent(
        &self,
        client: &SearchClient<T>,
        selector: Selector<'static, ValidateQueryDescriptor>,
    ) -> CallResult<Self> {
        client.validate_query(selector)
    }

    async fn call_fluent_async(
        &self,
        client: &SearchClient<T>,
        selector: Selector<'static, ValidateQueryDescriptor>,
    ) -> CallResult<Self> {
        client.validate_query_async(selector).await
    }

    fn call_initializer(
        &self,
        client: &SearchClient<T>,
        request: ValidateQueryRequest,
    ) -> CallResult<Self> {
        client.validate_query_request(request)
    }

    async fn call_initializer_async(
        &self,
        client: &SearchClient<T>,
        request: ValidateQueryRequest,
    ) -> CallResult<Self> {
        client.validate_query_request_async(request).await
    }

    async fn integration_setup(
        &self,
        _client: &SearchClient<T>,
        values: &CallUniqueValues,
    ) -> Result<(), ApiError> {
        self.setups.fetch_add(1, Ordering::SeqCst);
        self.record(format!("setup:{}", values.value("seed")));
        Ok(())
    }

    async fn on_before_call(
        &self,
        _client: &SearchClient<T>,
        variant: CallVariant,
    ) -> Result<(), ApiError> {
        self.record(format!("before:{variant}"));
        if self.fail_on == Some(variant) {
            return Err(ClientError::Connection("injected failure".to_string()).into());
        }
        Ok(())
    }

    async fn on_after_call(
        &self,
        _client: &SearchClient<T>,
        variant: CallVariant,
    ) -> Result<(), ApiError> {
        self.record(format!("after:{variant}"));
        Ok(())
    }
}
