//! Entity trait: things with identity.

/// An entity is defined by its identity, not its attributes: a renamed
/// customer is still the same customer. Each entity type declares its own id
/// newtype so ids of different entities cannot be mixed up.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
