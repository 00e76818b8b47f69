//! Per-test shared state.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use crate::lazy_responses::LazyResponses;
use crate::unique_values::CallUniqueValues;

/// State owned by one endpoint test instance.
///
/// Holds the unique values every variant reads, the flag recording whether
/// integration setup ran, and the memoized responses. Nothing in here is
/// shared with another test instance.
pub struct EndpointUsage<R> {
    values: Arc<CallUniqueValues>,
    called_setup: Arc<AtomicBool>,
    responses: OnceLock<LazyResponses<R>>,
}

impl<R> Default for EndpointUsage<R> {
    fn default() -> Self {
        Self {
            values: Arc::new(CallUniqueValues::new()),
            called_setup: Arc::new(AtomicBool::new(false)),
            responses: OnceLock::new(),
        }
    }
}

impl<R> fmt::Debug for EndpointUsage<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointUsage")
            .field("values", &self.values)
            .field("called_setup", &self.called_setup())
            .field("responses", &self.responses.get())
            .finish()
    }
}

impl<R> EndpointUsage<R> {
    /// Creates fresh state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The unique values for this test.
    pub fn values(&self) -> &Arc<CallUniqueValues> {
        &self.values
    }

    /// The setup flag, for the computation that runs setup.
    pub fn setup_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.called_setup)
    }

    /// Returns `true` if integration setup has run.
    pub fn called_setup(&self) -> bool {
        self.called_setup.load(Ordering::SeqCst)
    }

    /// Returns the memoized responses, creating them with `init` on first use.
    pub fn call_once<F>(&self, init: F) -> &LazyResponses<R>
    where
        F: FnOnce() -> LazyResponses<R>,
    {
        self.responses.get_or_init(init)
    }
}

/// Sets `flag` and returns `true` if it was not already set.
pub fn claim_setup(flag: &AtomicBool) -> bool {
    !flag.swap(true, Ordering::SeqCst)
}
