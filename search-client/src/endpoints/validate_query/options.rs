//! Query options and body shared by the descriptor and the typed request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Operator applied between terms of a `q` query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum DefaultOperator {
    /// All terms must match.
    And,
    /// Any term may match.
    Or,
}

/// URL options of a validate-query call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateQueryOptions {
    /// Query in Lucene query-string syntax.
    pub q: Option<String>,
    /// Return detailed information about why the query is invalid.
    pub explain: Option<bool>,
    /// Return the rewritten form of the query.
    pub rewrite: Option<bool>,
    /// Run against all shards instead of one random shard.
    pub all_shards: Option<bool>,
    /// Default operator for `q`.
    pub default_operator: Option<DefaultOperator>,
    /// Default field for `q`.
    pub df: Option<String>,
    /// Analyzer for `q`.
    pub analyzer: Option<String>,
    /// Ignore format-based failures.
    pub lenient: Option<bool>,
    /// Analyze wildcard and prefix queries.
    pub analyze_wildcard: Option<bool>,
}

impl ValidateQueryOptions {
    /// Returns the set options as query-string pairs.
    pub fn to_query(&self) -> BTreeMap<String, String> {
        let mut query = BTreeMap::new();
        let mut put = |name: &str, value: Option<String>| {
            if let Some(value) = value {
                query.insert(name.to_string(), value);
            }
        };

        put("q", self.q.clone());
        put("explain", self.explain.map(|v| v.to_string()));
        put("rewrite", self.rewrite.map(|v| v.to_string()));
        put("all_shards", self.all_shards.map(|v| v.to_string()));
        put("default_operator", self.default_operator.map(|v| v.to_string()));
        put("df", self.df.clone());
        put("analyzer", self.analyzer.clone());
        put("lenient", self.lenient.map(|v| v.to_string()));
        put("analyze_wildcard", self.analyze_wildcard.map(|v| v.to_string()));

        query
    }
}

/// JSON body of a validate-query call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidateQueryBody {
    /// The query DSL to validate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<serde_json::Value>,
}

impl ValidateQueryBody {
    /// Returns `true` if there is nothing to send.
    pub fn is_empty(&self) -> bool {
        self.query.is_none()
    }
}
