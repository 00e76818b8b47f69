//! URL equivalence checking.
//!
//! [`assert_url_matches`] compares the URL a call actually requested with a
//! literal `path?query` template. The path must match exactly. The query is
//! compared as a set of parameters: order does not matter, missing, extra
//! or differently valued parameters do. The `pretty=true` diagnostic flag
//! is ignored on both sides.

use std::collections::BTreeMap;

use search_client::PRETTY_PARAM;
use thiserror::Error;
use url::Url;

/// Why a URL did not match its template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlMismatch {
    /// The paths differ.
    #[error("expected path {expected}, got {actual}")]
    Path {
        /// Expected absolute path.
        expected: String,
        /// Actual absolute path.
        actual: String,
    },

    /// Only one side has a query string.
    #[error("expected query {expected:?}, got {actual:?}")]
    QueryPresence {
        /// Normalized expected query.
        expected: String,
        /// Normalized actual query.
        actual: String,
    },

    /// The number of parameters differs.
    #[error("expected {expected} query parameters, got {actual} ({actual_query:?})")]
    ParameterCount {
        /// Expected parameter count.
        expected: usize,
        /// Actual parameter count.
        actual: usize,
        /// Normalized actual query.
        actual_query: String,
    },

    /// Expected parameters are missing.
    #[error("missing query parameters {missing:?}")]
    MissingParameters {
        /// Names present in the template but not in the URL.
        missing: Vec<String>,
    },

    /// Same names, different values.
    #[error("query parameters differ: expected {expected:?}, got {actual:?}")]
    ParameterValues {
        /// Expected parameters.
        expected: BTreeMap<String, String>,
        /// Actual parameters.
        actual: BTreeMap<String, String>,
    },

    /// A parameter name appears more than once.
    #[error("query parameter {name} appears more than once in {query:?}")]
    DuplicateParameter {
        /// The repeated name.
        name: String,
        /// The query it was found in.
        query: String,
    },
}

/// Checks `actual` against an expected `path?query` template.
///
/// ## Errors
///
/// Returns the first [`UrlMismatch`] found, checking in order: path, query
/// presence, parameter count, missing names, values.
///
/// ## Examples
///
/// ```rust
/// use search_harness::assert_url_matches;
/// use url::Url;
///
/// let url = Url::parse("http://localhost:9200/my_index/_validate/query?b=2&a=1").unwrap();
/// assert!(assert_url_matches(&url, "my_index/_validate/query?a=1&b=2").is_ok());
/// assert!(assert_url_matches(&url, "my_index/_validate/query?a=1&b=3").is_err());
/// ```
pub fn assert_url_matches(actual: &Url, expected_template: &str) -> Result<(), UrlMismatch> {
    let (expected_path, expected_query) = expected_template
        .split_once('?')
        .unwrap_or((expected_template, ""));

    let expected_path = absolute_path(expected_path);
    if actual.path() != expected_path {
        return Err(UrlMismatch::Path {
            expected: expected_path,
            actual: actual.path().to_string(),
        });
    }

    let actual_query = strip_pretty(actual.query().unwrap_or_default());
    let expected_query = strip_pretty(expected_query);

    match (actual_query.is_empty(), expected_query.is_empty()) {
        (true, true) => return Ok(()),
        (false, false) => {}
        _ => {
            return Err(UrlMismatch::QueryPresence {
                expected: expected_query,
                actual: actual_query,
            });
        }
    }

    let actual_params = parse_query(&actual_query)?;
    let expected_params = parse_query(&expected_query)?;

    if actual_params.len() != expected_params.len() {
        return Err(UrlMismatch::ParameterCount {
            expected: expected_params.len(),
            actual: actual_params.len(),
            actual_query,
        });
    }

    let missing: Vec<String> = expected_params
        .keys()
        .filter(|k| !actual_params.contains_key(*k))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(UrlMismatch::MissingParameters { missing });
    }

    if actual_params != expected_params {
        return Err(UrlMismatch::ParameterValues {
            expected: expected_params,
            actual: actual_params,
        });
    }

    Ok(())
}

fn absolute_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Removes every `pretty=true` pair from a raw query string.
fn strip_pretty(query: &str) -> String {
    let flag = format!("{}={}", PRETTY_PARAM.0, PRETTY_PARAM.1);
    query
        .split('&')
        .filter(|pair| !pair.is_empty() && *pair != flag)
        .collect::<Vec<_>>()
        .join("&")
}

/// Parses a query string into decoded name/value pairs, skipping empty names.
fn parse_query(query: &str) -> Result<BTreeMap<String, String>, UrlMismatch> {
    let mut params = BTreeMap::new();
    for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if name.trim().is_empty() {
            continue;
        }
        if params.insert(name.to_string(), value.into_owned()).is_some() {
            return Err(UrlMismatch::DuplicateParameter {
                name: name.into_owned(),
                query: query.to_string(),
            });
        }
    }
    Ok(params)
}
