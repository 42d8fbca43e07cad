//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// - **Value Object**: No identity (two date ranges with the same bounds are equal)
/// - **Entity**: Has identity (two movements with the same id are the same movement)
///
/// Value objects are immutable. To "modify" one, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
