use chrono::{DateTime, Utc};

/// A domain event.
///
/// Events are immutable facts: something that already happened in the domain.
/// Each event exposes a discriminant (`Kind`) used to route it to registered
/// handlers, a stable dotted name for logs, and the business time at which it
/// occurred.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Closed set of discriminants keying the dispatcher registry.
    ///
    /// Typically a fieldless enum mirroring the event enum's variants, so a
    /// handler can be registered for "customer created" without constructing
    /// a customer-created event.
    type Kind: Copy + Eq + core::hash::Hash + core::fmt::Debug + Send + Sync + 'static;

    /// The discriminant of this event instance.
    fn kind(&self) -> Self::Kind;

    /// Stable event name/type identifier (e.g. "products.product.created").
    fn event_type(&self) -> &'static str;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
