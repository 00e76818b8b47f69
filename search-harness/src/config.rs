//! Harness configuration.
//!
//! The harness never reads process-wide state. Whoever constructs it passes
//! a [`HarnessConfig`]; [`HarnessConfig::from_env`] exists for binaries that
//! want to derive one from the environment once at startup.

/// Environment variable enabling integration mode.
pub const INTEGRATION_ENV: &str = "SEARCH_HARNESS_INTEGRATION";

/// Environment variable holding the integration cluster port.
pub const PORT_ENV: &str = "SEARCH_HARNESS_PORT";

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 9200;

/// Settings for one harness run.
///
/// ## Examples
///
/// ```rust
/// use search_harness::HarnessConfig;
///
/// let unit = HarnessConfig::unit();
/// assert!(!unit.run_integration_tests);
///
/// let integration = HarnessConfig::integration(9250);
/// assert!(integration.run_integration_tests);
/// assert_eq!(integration.cluster_port, 9250);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Run integration setup hooks and integration-only test cases.
    pub run_integration_tests: bool,
    /// Port of the cluster integration tests talk to.
    pub cluster_port: u16,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::unit()
    }
}

impl HarnessConfig {
    /// Unit mode: no integration setup, integration cases are skipped.
    pub fn unit() -> Self {
        Self {
            run_integration_tests: false,
            cluster_port: DEFAULT_PORT,
        }
    }

    /// Integration mode against a cluster on `port`.
    pub fn integration(port: u16) -> Self {
        Self {
            run_integration_tests: true,
            cluster_port: port,
        }
    }

    /// Reads [`INTEGRATION_ENV`] and [`PORT_ENV`].
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    ///
    /// Integration mode is on for `1`, `true` or `yes` (any case). A
    /// missing or unparsable port falls back to [`DEFAULT_PORT`].
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let run_integration_tests = lookup(INTEGRATION_ENV)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let cluster_port = lookup(PORT_ENV)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            run_integration_tests,
            cluster_port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_is_unit() {
        assert_eq!(HarnessConfig::default(), HarnessConfig::unit());
        assert_eq!(HarnessConfig::default().cluster_port, DEFAULT_PORT);
    }

    #[test]
    fn test_truthy_values() {
        for value in ["1", "true", "TRUE", "yes", " Yes "] {
            let config = HarnessConfig::from_lookup(lookup(&[(INTEGRATION_ENV, value)]));
            assert!(config.run_integration_tests, "{value} should enable integration");
        }
        let config = HarnessConfig::from_lookup(lookup(&[(INTEGRATION_ENV, "0")]));
        assert!(!config.run_integration_tests);
    }

    #[test]
    fn test_port_parsing() {
        let config = HarnessConfig::from_lookup(lookup(&[(PORT_ENV, "9250")]));
        assert_eq!(config.cluster_port, 9250);

        let config = HarnessConfig::from_lookup(lookup(&[(PORT_ENV, "not-a-port")]));
        assert_eq!(config.cluster_port, DEFAULT_PORT);
    }

    #[test]
    fn test_nothing_set() {
        assert_eq!(HarnessConfig::from_lookup(|_| None), HarnessConfig::unit());
    }
}
