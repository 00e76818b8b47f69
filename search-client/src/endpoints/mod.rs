//! Endpoint surfaces.
//!
//! Each endpoint module defines its descriptor, typed request and response,
//! an [`Endpoint`](crate::Endpoint) marker, and four inherent methods on
//! [`SearchClient`](crate::SearchClient): fluent, fluent async, typed and
//! typed async. All four go through the same [`Dispatcher`](crate::Dispatcher)
//! path.

pub mod validate_query;
