//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute values
/// (`Price`, `Rating`). They are immutable: "changing" one means building a new
/// one, which goes through the same validation as the original.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
