//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values;
/// two with the same values are interchangeable. Contrast with entities,
/// which are identified by an ID regardless of attribute values.
///
/// To "modify" a value object, construct a new one. This keeps them safe to
/// share across threads and lets them behave like primitives.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
