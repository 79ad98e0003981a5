//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**. Two value objects with the same values
//! are considered equal (e.g. two `Department("DAIRY")` values).

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. To
/// "modify" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct StorageLocation(String);
///
/// impl ValueObject for StorageLocation {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
