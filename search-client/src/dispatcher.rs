//! Request dispatch with tracing instrumentation.
//!
//! The [`Dispatcher`] is the single path every endpoint call takes: resolve
//! the [`Source`], derive [`RequestParameters`], serialize the body, let the
//! endpoint route the call, hand it to the [`Transport`] exactly once, and
//! deserialize the result into the endpoint's response type.

use bytes::Bytes;
use serde::Serialize;
use tracing::{Span, debug, instrument};

use crate::endpoint::Endpoint;
use crate::error::{ApiError, SerializationError};
use crate::params::RequestParameters;
use crate::request::{ApiRequest, Resolved, Source};
use crate::response::ApiResponse;
use crate::transport::{RawResponse, Transport};

/// Source type accepted by an endpoint `E`.
pub type EndpointSource<'a, E> =
    Source<'a, <E as Endpoint>::Descriptor, <E as Endpoint>::Request>;

/// Turns fluent selectors and typed requests into transport calls.
#[derive(Debug)]
pub struct Dispatcher<T> {
    transport: T,
}

impl<T: Transport> Dispatcher<T> {
    /// Creates a dispatcher over the given transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Dispatches a call, blocking until the response arrives.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The endpoint cannot route the resolved request
    /// - The body cannot be serialized
    /// - The transport fails or the server answers with a non-success status
    /// - The response cannot be deserialized into `E::Response`
    #[instrument(
        name = "api_request",
        skip(self, source),
        fields(
            endpoint = E::ID,
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub fn dispatch<E: Endpoint>(
        &self,
        source: EndpointSource<'_, E>,
    ) -> Result<ApiResponse<E::Response>, ApiError> {
        let (params, body) = prepare::<E>(source)?;
        let raw = self.transport.send(&params, body).map_err(record_failure)?;
        finish::<E>(raw)
    }

    /// Asynchronous twin of [`dispatch`](Self::dispatch).
    ///
    /// ## Errors
    ///
    /// Same conditions as [`dispatch`](Self::dispatch).
    #[instrument(
        name = "api_request",
        skip(self, source),
        fields(
            endpoint = E::ID,
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn dispatch_async<E: Endpoint>(
        &self,
        source: EndpointSource<'_, E>,
    ) -> Result<ApiResponse<E::Response>, ApiError> {
        let (params, body) = prepare::<E>(source)?;
        let raw = self
            .transport
            .send_async(&params, body)
            .await
            .map_err(record_failure)?;
        finish::<E>(raw)
    }
}

/// Resolves the source and produces routed parameters plus the encoded body.
fn prepare<E: Endpoint>(
    source: EndpointSource<'_, E>,
) -> Result<(RequestParameters, Option<Bytes>), ApiError> {
    let (params, body) = match source.resolve() {
        Resolved::Descriptor(descriptor) => (
            RequestParameters::from_request(&descriptor),
            encode_body(descriptor.body())?,
        ),
        Resolved::Request(request) => (
            RequestParameters::from_request(&request),
            encode_body(request.body())?,
        ),
    };
    let params = E::route(params)?;

    Span::current().record("http.method", params.method().to_string().as_str());
    Ok((params, body))
}

fn encode_body<B: Serialize>(body: Option<&B>) -> Result<Option<Bytes>, SerializationError> {
    body.map(|b| SerializationError::encode(b).map(Bytes::from))
        .transpose()
}

fn finish<E: Endpoint>(raw: RawResponse) -> Result<ApiResponse<E::Response>, ApiError> {
    let span = Span::current();
    span.record("http.url", raw.uri.as_str());
    span.record("http.status_code", raw.status);
    debug!(status = raw.status, len = raw.body.len(), "response received");

    let body = SerializationError::decode::<E::Response>(&raw.body).inspect_err(|_| {
        Span::current().record("otel.status_code", "ERROR");
    })?;
    span.record("otel.status_code", "OK");

    Ok(ApiResponse::new(body, raw.status, raw.uri, raw.method))
}

fn record_failure(err: crate::error::ClientError) -> ApiError {
    let span = Span::current();
    if let Some(status) = err.status_code() {
        span.record("http.status_code", status);
    }
    let otel_status = match err.status_code() {
        Some(status) if status < 500 => "UNSET",
        _ => "ERROR",
    };
    span.record("otel.status_code", otel_status);
    err.into()
}
