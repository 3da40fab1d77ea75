//! Value object trait: things without identity.

/// Marker trait for value objects.
///
/// A value object is defined entirely by its attribute values: two instances
/// with the same values are interchangeable. They stay immutable after
/// construction; "changing" one means constructing a new one.
///
/// The bounds keep them usable as plain values: cloneable, compared by value,
/// printable in logs and test failures.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Address {
///     street: String,
///     number: u32,
/// }
///
/// impl ValueObject for Address {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
