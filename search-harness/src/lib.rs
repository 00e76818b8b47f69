//! Equivalence harness for the four search-client calling conventions.
//!
//! For one endpoint test the harness calls the fluent, fluent async, typed
//! and typed async entry points exactly once each, in that order, and keeps
//! the results for every check to inspect. The checks prove the four calls
//! produced the same request and decoded the same response.
//!
//! ## Features
//!
//! - **Once-only execution**: [`LazyResponses`] memoizes the run across any number of awaiters
//! - **Shared fixture data**: [`CallUniqueValues`] hands every variant the same generated values
//! - **URL equivalence**: [`assert_url_matches`] ignores parameter order and the `pretty` flag
//! - **Explicit registration**: [`TestRegistry`] tables, no runtime discovery
//!
//! ## Example
//!
//! ```rust,ignore
//! use search_harness::{EndpointHarness, HarnessConfig, InMemoryCluster};
//!
//! let cluster = InMemoryCluster::new(9200, r#"{"valid":true}"#);
//! let harness = EndpointHarness::on_cluster(ValidateQueryTest, &cluster, HarnessConfig::unit())?;
//!
//! let report = EndpointHarness::standard_registry()
//!     .run_all(&harness, harness.config())
//!     .await;
//! assert!(report.is_success(), "{report}");
//! ```

pub mod call_variant;
pub mod cluster;
pub mod config;
pub mod error;
pub mod in_memory;
pub mod lazy_responses;
pub mod registry;
pub mod serialization;
pub mod unique_values;
pub mod url_check;
pub mod usage;

pub use api_test::{
    ApiTest, CallResult, DescriptorOf, EndpointHarness, RequestOf, ResponseOf,
};
pub use call_variant::CallVariant;
pub use cluster::{ConfigureClient, HttpCluster, IntegrationCluster};
pub use config::HarnessConfig;
pub use error::{AssertionError, HarnessError};
pub use in_memory::{InMemoryCluster, InMemoryTransport, RecordedCall};
pub use lazy_responses::{LazyResponses, Responses, VariantResult};
pub use registry::{CaseFn, CaseFuture, CaseOutcome, RegistryReport, TestCase, TestKind, TestRegistry};
pub use serialization::{assert_round_trips, to_json};
pub use unique_values::{CallUniqueValues, random_token};
pub use url_check::{UrlMismatch, assert_url_matches};
pub use usage::EndpointUsage;
