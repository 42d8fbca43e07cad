//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Every persisted ledger row implements this so the store boundary can key
/// rows without knowing their shape.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Clone + Eq + Ord + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Stable entity name used in errors and logs (e.g. "material").
    const NAME: &'static str;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
