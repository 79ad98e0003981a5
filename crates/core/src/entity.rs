//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// A warehouse keeps its identity when renamed; an inventory line keeps its
/// identity when it is re-homed to another warehouse.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
