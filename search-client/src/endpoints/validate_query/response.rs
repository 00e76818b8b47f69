//! Validate-query response types.

use serde::{Deserialize, Serialize};

/// Outcome of validating a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateQueryResponse {
    /// Whether the query is valid.
    pub valid: bool,
    /// Shard statistics, absent when the server did not report them.
    #[serde(rename = "_shards", default, skip_serializing_if = "Option::is_none")]
    pub shards: Option<ShardStatistics>,
    /// Per-index explanations, present when `explain` or `rewrite` was set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub explanations: Vec<QueryExplanation>,
    /// Top-level error message for invalid queries without explanations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// How many shards took part in the validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardStatistics {
    /// Shards addressed.
    pub total: u32,
    /// Shards that answered.
    pub successful: u32,
    /// Shards that failed.
    pub failed: u32,
}

/// Explanation for one index (or shard, with `all_shards`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryExplanation {
    /// Index the explanation belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    /// Shard number, reported only with `all_shards`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shard: Option<i32>,
    /// Whether the query is valid against this index.
    pub valid: bool,
    /// The query as rewritten by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Why the query is invalid against this index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_with_explanations() {
        let payload = json!({
            "valid": false,
            "_shards": {"total": 1, "successful": 1, "failed": 0},
            "explanations": [{
                "index": "my_index",
                "valid": false,
                "error": "failed to parse query"
            }]
        });

        let response: ValidateQueryResponse = serde_json::from_value(payload).unwrap();
        assert!(!response.valid);
        assert_eq!(response.shards.map(|s| s.total), Some(1));
        assert_eq!(response.explanations[0].index.as_deref(), Some("my_index"));
        assert_eq!(response.explanations[0].shard, None);
    }

    #[test]
    fn test_minimal_payload() {
        let response: ValidateQueryResponse = serde_json::from_str(r#"{"valid":true}"#).unwrap();
        assert!(response.valid);
        assert!(response.shards.is_none());
        assert!(response.explanations.is_empty());
    }
}
