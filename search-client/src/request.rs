//! The request capability shared by fluent descriptors and typed requests.
//!
//! Every endpoint can be called two ways: with a closure that configures a
//! fresh descriptor, or with an already-built request object. [`Source`]
//! carries either one to the dispatcher, which resolves it by matching on
//! the variant.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::method::HttpMethod;

/// Anything that can describe one API call.
///
/// Implemented by both the fluent descriptor and the typed request of an
/// endpoint. Two logically equivalent objects must answer every method
/// identically.
pub trait ApiRequest {
    /// The JSON body type, `()` for endpoints without a body.
    type Body: Serialize;

    /// The HTTP method this request is sent with.
    fn method(&self) -> HttpMethod;

    /// The URL path, one entry per segment.
    fn path_segments(&self) -> Vec<String>;

    /// Query-string options.
    fn query(&self) -> BTreeMap<String, String>;

    /// The body, if this request carries one.
    fn body(&self) -> Option<&Self::Body>;
}

/// A fluent selector applied to a fresh descriptor.
pub type Selector<'a, D> = Box<dyn FnOnce(D) -> D + Send + 'a>;

/// Where a call's request comes from.
pub enum Source<'a, D, R> {
    /// A closure that configures an empty descriptor.
    Builder(Selector<'a, D>),
    /// A request object built by the caller.
    Typed(R),
}

impl<'a, D, R> Source<'a, D, R>
where
    D: ApiRequest + Default,
    R: ApiRequest,
{
    /// Wraps a fluent selector.
    pub fn builder(selector: impl FnOnce(D) -> D + Send + 'a) -> Self {
        Self::Builder(Box::new(selector))
    }

    /// Wraps a typed request.
    pub fn typed(request: R) -> Self {
        Self::Typed(request)
    }

    /// Resolves the source to a concrete request object.
    ///
    /// A builder is invoked exactly once against `D::default()`.
    pub fn resolve(self) -> Resolved<D, R> {
        match self {
            Self::Builder(selector) => Resolved::Descriptor(selector(D::default())),
            Self::Typed(request) => Resolved::Request(request),
        }
    }
}

impl<D, R> std::fmt::Debug for Source<'_, D, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builder(_) => f.write_str("Source::Builder(..)"),
            Self::Typed(_) => f.write_str("Source::Typed(..)"),
        }
    }
}

/// A source after resolution.
#[derive(Debug)]
pub enum Resolved<D, R> {
    /// Produced by a fluent selector.
    Descriptor(D),
    /// Supplied by the caller.
    Request(R),
}
