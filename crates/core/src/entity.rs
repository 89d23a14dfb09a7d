//! Entity trait: a record with a stable identity inside a collection.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether this entity carries the given identifier (exact, case-sensitive).
    fn has_id(&self, id: &Self::Id) -> bool {
        self.id() == id
    }
}
