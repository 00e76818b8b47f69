//! The four ways an endpoint can be called.

use strum::{Display, EnumIter};

/// One of the four equivalent calling conventions.
///
/// Used only to label and order calls; it never changes what is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
pub enum CallVariant {
    /// Fluent selector, blocking.
    Fluent,
    /// Fluent selector, awaited.
    FluentAsync,
    /// Typed request, blocking.
    Initializer,
    /// Typed request, awaited.
    InitializerAsync,
}

impl CallVariant {
    /// The order in which the harness runs the variants.
    pub const ORDER: [CallVariant; 4] = [
        Self::Fluent,
        Self::FluentAsync,
        Self::Initializer,
        Self::InitializerAsync,
    ];

    /// Returns `true` for the awaited variants.
    pub fn is_async(&self) -> bool {
        matches!(self, Self::FluentAsync | Self::InitializerAsync)
    }

    /// Returns `true` for the fluent-selector variants.
    pub fn is_fluent(&self) -> bool {
        matches!(self, Self::Fluent | Self::FluentAsync)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_order_matches_declaration() {
        let declared: Vec<_> = CallVariant::iter().collect();
        assert_eq!(declared, CallVariant::ORDER.to_vec());
    }

    #[test]
    fn test_classification() {
        assert!(CallVariant::FluentAsync.is_async());
        assert!(CallVariant::FluentAsync.is_fluent());
        assert!(!CallVariant::Initializer.is_async());
        assert!(!CallVariant::InitializerAsync.is_fluent());
    }

    #[test]
    fn test_display() {
        assert_eq!(CallVariant::InitializerAsync.to_string(), "InitializerAsync");
    }
}
