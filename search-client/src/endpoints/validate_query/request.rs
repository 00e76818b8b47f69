//! Strongly-typed validate-query request.

use std::collections::BTreeMap;

use super::options::{ValidateQueryBody, ValidateQueryOptions};
use crate::method::HttpMethod;
use crate::request::ApiRequest;

/// A validate-query call expressed as plain data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidateQueryRequest {
    /// Target indices; empty validates against all indices.
    pub indices: Vec<String>,
    /// URL options.
    pub options: ValidateQueryOptions,
    /// JSON body.
    pub body: ValidateQueryBody,
}

impl ValidateQueryRequest {
    /// Creates a request against all indices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a request against the given indices.
    pub fn for_indices<I, S>(indices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            indices: indices.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

impl ApiRequest for ValidateQueryRequest {
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
