//! Fluent builder for validate-query calls.

use std::collections::BTreeMap;

use super::options::{DefaultOperator, ValidateQueryBody, ValidateQueryOptions};
use crate::method::HttpMethod;
use crate::request::ApiRequest;

/// Fluent description of a validate-query call.
///
/// Start from `Default::default()` (the client does this for you) and chain
/// setters; each consumes and returns the descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidateQueryDescriptor {
    indices: Vec<String>,
    options: ValidateQueryOptions,
    body: ValidateQueryBody,
}

impl ValidateQueryDescriptor {
    /// Adds an index to validate against.
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.indices.push(index.into());
        self
    }

    /// Replaces the target indices.
    pub fn indices<I, S>(mut self, indices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indices = indices.into_iter().map(Into::into).collect();
        self
    }

    /// Sets a Lucene query-string query.
    pub fn q(mut self, q: impl Into<String>) -> Self {
        self.options.q = Some(q.into());
        self
    }

    /// Requests an explanation of validation failures.
    pub fn explain(mut self, explain: bool) -> Self {
        self.options.explain = Some(explain);
        self
    }

    /// Requests the rewritten query.
    pub fn rewrite(mut self, rewrite: bool) -> Self {
        self.options.rewrite = Some(rewrite);
        self
    }

    /// Validates on all shards.
    pub fn all_shards(mut self, all_shards: bool) -> Self {
        self.options.all_shards = Some(all_shards);
        self
    }

    /// Sets the default operator for `q`.
    pub fn default_operator(mut self, operator: DefaultOperator) -> Self {
        self.options.default_operator = Some(operator);
        self
    }

    /// Sets the default field for `q`.
    pub fn df(mut self, field: impl Into<String>) -> Self {
        self.options.df = Some(field.into());
        self
    }

    /// Sets the analyzer for `q`.
    pub fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.options.analyzer = Some(analyzer.into());
        self
    }

    /// Ignores format-based failures.
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.options.lenient = Some(lenient);
        self
    }

    /// Analyzes wildcard and prefix queries.
    pub fn analyze_wildcard(mut self, analyze: bool) -> Self {
        self.options.analyze_wildcard = Some(analyze);
        self
    }

    /// Sets the query DSL body.
    pub fn query(mut self, query: serde_json::Value) -> Self {
        self.body.query = Some(query);
        self
    }
}

impl ApiRequest for ValidateQueryDescriptor {
    type Body = ValidateQueryBody;

    fn method(&self) -> HttpMethod {
        super::method_for(&self.body)
    }

    fn path_segments(&self) -> Vec<String> {
        super::path_segments(&self.indices)
    }

    fn query(&self) -> BTreeMap<String, String> {
        self.options.to_query()
    }

    fn body(&self) -> Option<&ValidateQueryBody> {
        (!self.body.is_empty()).then_some(&self.body)
    }
}
