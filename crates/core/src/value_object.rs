//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**: two value objects with the same values
//! are equal. A pet's needs or its sleep interval are value objects, the pet
//! itself is an entity.

/// Marker trait for value objects.
///
/// Value objects are immutable in spirit: to "modify" one, build a new one
/// with the new values (e.g. `Needs::with_hunger`).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
