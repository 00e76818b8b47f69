//! At-most-once execution of the four call variants.
//!
//! [`LazyResponses`] wraps the deferred work in a [`Shared`] future. The
//! first awaiter drives it, later and concurrent awaiters wait for the same
//! completion and all of them receive the same [`Arc<Responses>`]. The work
//! is never restarted, even if the awaiter that started it is dropped.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use search_client::{ApiError, ApiResponse};

use crate::call_variant::CallVariant;

/// Outcome of one variant.
pub type VariantResult<R> = Result<ApiResponse<R>, ApiError>;

/// What one run of the four variants produced.
#[derive(Debug)]
pub struct Responses<R> {
    results: BTreeMap<CallVariant, VariantResult<R>>,
    setup_failure: Option<ApiError>,
}

impl<R> Default for Responses<R> {
    fn default() -> Self {
        Self {
            results: BTreeMap::new(),
            setup_failure: None,
        }
    }
}

impl<R> Responses<R> {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A run that stopped because integration setup failed.
    pub fn setup_failed(error: ApiError) -> Self {
        Self {
            results: BTreeMap::new(),
            setup_failure: Some(error),
        }
    }

    /// Records the outcome of `variant`.
    pub fn record(&mut self, variant: CallVariant, result: VariantResult<R>) {
        self.results.insert(variant, result);
    }

    /// Returns the outcome of `variant`, if it ran.
    pub fn get(&self, variant: CallVariant) -> Option<&VariantResult<R>> {
        self.results.get(&variant)
    }

    /// Iterates over outcomes in variant order.
    pub fn iter(&self) -> impl Iterator<Item = (CallVariant, &VariantResult<R>)> {
        self.results.iter().map(|(variant, result)| (*variant, result))
    }

    /// Iterates over the variants that failed.
    pub fn failures(&self) -> impl Iterator<Item = (CallVariant, &ApiError)> {
        self.iter()
            .filter_map(|(variant, result)| result.as_ref().err().map(|e| (variant, e)))
    }

    /// Returns the integration setup error, if setup failed.
    pub fn setup_failure(&self) -> Option<&ApiError> {
        self.setup_failure.as_ref()
    }

    /// Number of variants that ran.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns `true` if no variant ran.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A memoized run of the four variants.
pub struct LazyResponses<R> {
    inner: Shared<BoxFuture<'static, Arc<Responses<R>>>>,
    executions: Arc<AtomicUsize>,
}

impl<R> fmt::Debug for LazyResponses<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyResponses")
            .field("ready", &self.inner.peek().is_some())
            .field("executions", &self.executions())
            .finish()
    }
}

impl<R: Send + Sync + 'static> LazyResponses<R> {
    /// Defers `compute` until the first [`get`](Self::get).
    pub fn new<F, Fut>(compute: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Responses<R>> + Send + 'static,
    {
        let executions = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&executions);
        let inner = async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Arc::new(compute().await)
        }
        .boxed()
        .shared();

        Self { inner, executions }
    }

    /// Runs the computation if nobody has yet and waits for its result.
    pub async fn get(&self) -> Arc<Responses<R>> {
        self.inner.clone().await
    }
}

impl<R> LazyResponses<R> {
    /// Returns `true` once the computation has completed.
    pub fn is_ready(&self) -> bool {
        self.inner.peek().is_some()
    }

    /// How many times the computation has started. Never more than one.
    pub fn executions(&self) -> usize {
        self.executions.load(Ordering::SeqCst)
    }
}
