//! Harness error types.
//!
//! [`AssertionError`] is what a failing check returns. Every variant that
//! concerns a call names the [`CallVariant`] it happened under.

use search_client::{ApiError, HttpMethod};
use thiserror::Error;

use crate::call_variant::CallVariant;
use crate::url_check::UrlMismatch;

/// A failed check.
#[derive(Debug, Error)]
pub enum AssertionError {
    /// The URL a variant requested does not match the expected template.
    #[error("[{variant}] {mismatch}")]
    UrlMismatch {
        /// The variant whose response was checked.
        variant: CallVariant,
        /// What differed.
        mismatch: UrlMismatch,
    },

    /// A variant used the wrong HTTP method.
    #[error("[{variant}] expected HTTP method {expected}, got {actual}")]
    MethodMismatch {
        /// The variant whose response was checked.
        variant: CallVariant,
        /// The expected method.
        expected: HttpMethod,
        /// The method actually used.
        actual: HttpMethod,
    },

    /// A value did not survive serialization unchanged.
    #[error("{subject} does not round-trip: expected {expected}, got {actual}")]
    RoundTrip {
        /// What was being serialized.
        subject: String,
        /// The original, rendered.
        expected: String,
        /// The value after the round trip, rendered.
        actual: String,
    },

    /// A value could not be serialized or deserialized at all.
    #[error("{subject} failed to serialize: {message}")]
    Serialization {
        /// What was being serialized.
        subject: String,
        /// The serde error message.
        message: String,
    },

    /// Two call variants disagree on something that must be identical.
    #[error("[{variant}] diverges from {baseline}: expected {expected}, got {actual}")]
    Divergence {
        /// The variant compared against the baseline.
        variant: CallVariant,
        /// The variant taken as reference.
        baseline: CallVariant,
        /// The baseline's value, rendered.
        expected: String,
        /// This variant's value, rendered.
        actual: String,
    },

    /// The call itself failed, so there is no response to check.
    #[error("[{variant}] call failed: {message}")]
    CallFailed {
        /// The variant that failed.
        variant: CallVariant,
        /// The client error message.
        message: String,
    },

    /// A user-supplied assertion over one response failed.
    #[error("asserting over the response from {variant} failed: {message}")]
    Response {
        /// The variant whose response was checked.
        variant: CallVariant,
        /// Why the assertion failed.
        message: String,
    },

    /// The integration setup hook failed before any call was made.
    #[error("integration setup failed: {0}")]
    SetupFailed(String),
}

impl AssertionError {
    /// Returns the variant this failure is attributed to, if any.
    pub fn variant(&self) -> Option<CallVariant> {
        match self {
            Self::UrlMismatch { variant, .. }
            | Self::MethodMismatch { variant, .. }
            | Self::Divergence { variant, .. }
            | Self::CallFailed { variant, .. }
            | Self::Response { variant, .. } => Some(*variant),
            Self::RoundTrip { .. } | Self::Serialization { .. } | Self::SetupFailed(_) => None,
        }
    }
}

/// Errors from running the harness itself.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A registered check failed.
    #[error(transparent)]
    Assertion(#[from] AssertionError),

    /// The client could not be built.
    #[error("failed to build client: {0}")]
    Client(#[from] ApiError),

    /// No test case is registered under this name.
    #[error("unknown test case: {0}")]
    UnknownTest(String),

    /// A test case name was registered twice.
    #[error("test case registered twice: {0}")]
    DuplicateTest(&'static str),

    /// A unique value was requested with a different type than it holds.
    #[error("unique value {key} is not a {expected}")]
    TypeMismatch {
        /// The value's key.
        key: String,
        /// The requested type.
        expected: &'static str,
    },
}
