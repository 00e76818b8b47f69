//! Explicit test registration.
//!
//! Test cases are plain function pointers collected into a
//! [`TestRegistry`] at startup, in the order they should run. Nothing is
//! discovered at runtime.

use std::fmt;

use futures::future::BoxFuture;
use strum::Display;
use tracing::{debug, warn};

use crate::config::HarnessConfig;
use crate::error::{AssertionError, HarnessError};

/// Future returned by a test case.
pub type CaseFuture<'a> = BoxFuture<'a, Result<(), AssertionError>>;

/// A test case body, run against a harness `H`.
pub type CaseFn<H> = for<'a> fn(&'a H) -> CaseFuture<'a>;

/// When a test case runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TestKind {
    /// Always.
    Unit,
    /// Only in integration mode.
    Integration,
}

/// One registered test.
pub struct TestCase<H> {
    /// Unique name.
    pub name: &'static str,
    /// When it runs.
    pub kind: TestKind,
    /// How many times it runs back to back.
    pub iterations: u32,
    run: CaseFn<H>,
}

impl<H> Clone for TestCase<H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for TestCase<H> {}

impl<H> fmt::Debug for TestCase<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("iterations", &self.iterations)
            .finish()
    }
}

impl<H> TestCase<H> {
    /// A case that always runs, once.
    pub fn unit(name: &'static str, run: CaseFn<H>) -> Self {
        Self {
            name,
            kind: TestKind::Unit,
            iterations: 1,
            run,
        }
    }

    /// A case that only runs in integration mode, once.
    pub fn integration(name: &'static str, run: CaseFn<H>) -> Self {
        Self {
            kind: TestKind::Integration,
            ..Self::unit(name, run)
        }
    }

    /// Runs the case `iterations` times, at least once.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    /// Whether `config` allows this case to run.
    pub fn enabled(&self, config: &HarnessConfig) -> bool {
        match self.kind {
            TestKind::Unit => true,
            TestKind::Integration => config.run_integration_tests,
        }
    }

    /// Runs every iteration, stopping at the first failure.
    ///
    /// ## Errors
    ///
    /// Returns the failing iteration's error.
    pub async fn run(&self, harness: &H) -> Result<(), AssertionError> {
        for iteration in 1..=self.iterations {
            debug!(case = self.name, iteration, "running test case");
            (self.run)(harness).await?;
        }
        Ok(())
    }
}

/// What happened to one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseOutcome {
    /// Ran and passed.
    Passed,
    /// Not enabled by the configuration.
    Skipped,
}

/// Results of [`TestRegistry::run_all`].
#[derive(Debug, Default)]
pub struct RegistryReport {
    /// Cases that passed, in run order.
    pub passed: Vec<&'static str>,
    /// Cases not enabled by the configuration.
    pub skipped: Vec<&'static str>,
    /// Cases that failed, with their errors.
    pub failed: Vec<(&'static str, AssertionError)>,
}

impl RegistryReport {
    /// Returns `true` if nothing failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Converts into the first failure, if any.
    ///
    /// ## Errors
    ///
    /// Returns the first failed case's error.
    pub fn into_result(self) -> Result<(), HarnessError> {
        match self.failed.into_iter().next() {
            Some((_, error)) => Err(error.into()),
            None => Ok(()),
        }
    }
}

impl fmt::Display for RegistryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed, {} skipped, {} failed",
            self.passed.len(),
            self.skipped.len(),
            self.failed.len()
        )?;
        for (name, error) in &self.failed {
            write!(f, "\n  {name}: {error}")?;
        }
        Ok(())
    }
}

/// An ordered table of test cases.
pub struct TestRegistry<H> {
    cases: Vec<TestCase<H>>,
}

impl<H> Default for TestRegistry<H> {
    fn default() -> Self {
        Self { cases: Vec::new() }
    }
}

impl<H> fmt::Debug for TestRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.cases).finish()
    }
}

impl<H> TestRegistry<H> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a case.
    ///
    /// ## Errors
    ///
    /// Returns [`HarnessError::DuplicateTest`] if the name is taken.
    pub fn register(&mut self, case: TestCase<H>) -> Result<(), HarnessError> {
        if self.get(case.name).is_some() {
            return Err(HarnessError::DuplicateTest(case.name));
        }
        self.cases.push(case);
        Ok(())
    }

    /// Adds a case known not to collide.
    pub(crate) fn push(&mut self, case: TestCase<H>) {
        self.cases.push(case);
    }

    /// Looks a case up by name.
    pub fn get(&self, name: &str) -> Option<&TestCase<H>> {
        self.cases.iter().find(|case| case.name == name)
    }

    /// Registered names, in run order.
    pub fn names(&self) -> Vec<&'static str> {
        self.cases.iter().map(|case| case.name).collect()
    }

    /// Number of registered cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Runs one case by name.
    ///
    /// ## Errors
    ///
    /// Returns [`HarnessError::UnknownTest`] for an unregistered name and
    /// [`HarnessError::Assertion`] if the case fails.
    pub async fn run_one(
        &self,
        name: &str,
        harness: &H,
        config: &HarnessConfig,
    ) -> Result<CaseOutcome, HarnessError> {
        let case = self
            .get(name)
            .ok_or_else(|| HarnessError::UnknownTest(name.to_string()))?;
        if !case.enabled(config) {
            return Ok(CaseOutcome::Skipped);
        }
        case.run(harness).await?;
        Ok(CaseOutcome::Passed)
    }

    /// Runs every enabled case in order. A failing case does not stop the
    /// ones after it.
    pub async fn run_all(&self, harness: &H, config: &HarnessConfig) -> RegistryReport {
        let mut report = RegistryReport::default();
        for case in &self.cases {
            if !case.enabled(config) {
                debug!(case = case.name, kind = %case.kind, "skipping test case");
                report.skipped.push(case.name);
                continue;
            }
            match case.run(harness).await {
                Ok(()) => report.passed.push(case.name),
                Err(error) => {
                    warn!(case = case.name, %error, "test case failed");
                    report.failed.push((case.name, error));
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use futures::FutureExt;

    use super::*;
    use crate::call_variant::CallVariant;

    #[derive(Default)]
    struct Counter {
        runs: AtomicU32,
    }

    fn count(counter: &Counter) -> CaseFuture<'_> {
        async move {
            counter.runs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        .boxed()
    }

    fn fail(_: &Counter) -> CaseFuture<'_> {
        async {
            Err(AssertionError::CallFailed {
                variant: CallVariant::FluentAsync,
                message: "refused".to_string(),
            })
        }
        .boxed()
    }

    #[tokio::test]
    async fn test_iterations_repeat_the_case() {
        let mut registry = TestRegistry::new();
        registry
            .register(TestCase::unit("count", count).with_iterations(5))
            .unwrap();

        let counter = Counter::default();
        let report = registry.run_all(&counter, &HarnessConfig::unit()).await;

        assert!(report.is_success());
        assert_eq!(report.passed, vec!["count"]);
        assert_eq!(counter.runs.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_integration_cases_skip_in_unit_mode() {
        let mut registry = TestRegistry::new();
        registry
            .register(TestCase::integration("count", count))
            .unwrap();

        let counter = Counter::default();
        let report = registry.run_all(&counter, &HarnessConfig::unit()).await;
        assert_eq!(report.skipped, vec!["count"]);
        assert_eq!(counter.runs.load(Ordering::SeqCst), 0);

        let report = registry
            .run_all(&counter, &HarnessConfig::integration(9200))
            .await;
        assert_eq!(report.passed, vec!["count"]);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_later_cases() {
        let mut registry = TestRegistry::new();
        registry.register(TestCase::unit("fail", fail)).unwrap();
        registry.register(TestCase::unit("count", count)).unwrap();

        let counter = Counter::default();
        let report = registry.run_all(&counter, &HarnessConfig::unit()).await;

        assert_eq!(report.passed, vec!["count"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "fail");
        assert!(report.to_string().contains("[FluentAsync] call failed: refused"));
        assert!(matches!(
            report.into_result(),
            Err(HarnessError::Assertion(AssertionError::CallFailed { .. }))
        ));
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let mut registry: TestRegistry<Counter> = TestRegistry::new();
        registry.register(TestCase::unit("count", count)).unwrap();

        let err = registry.register(TestCase::unit("count", fail)).unwrap_err();
        assert!(matches!(err, HarnessError::DuplicateTest("count")));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_run_one_unknown_name() {
        let registry: TestRegistry<Counter> = TestRegistry::new();
        let err = registry
            .run_one("missing", &Counter::default(), &HarnessConfig::unit())
            .await
            .unwrap_err();
        assert!(matches!(err, HarnessError::UnknownTest(name) if name == "missing"));
    }
}
