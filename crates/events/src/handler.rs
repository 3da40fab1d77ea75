use crate::Event;

/// Reacts to a dispatched event.
///
/// Handlers are registered on an [`EventDispatcher`](crate::EventDispatcher)
/// per event kind and invoked synchronously, in registration order, for each
/// matching event that is notified.
///
/// ## Design Philosophy
///
/// The trait makes **no assumptions about the side effect**: a handler may
/// log, send mail, update a read model, or call another service. Side-effect
/// failures are heterogeneous, so `handle` returns `anyhow::Result` and the
/// dispatcher wraps failures with the handler's name and the event type.
///
/// `Send + Sync` is required so a fully wired dispatcher can be shared across
/// threads behind an `Arc`.
pub trait EventHandler<E: Event>: Send + Sync {
    /// Stable handler name, used in logs and dispatch errors.
    fn name(&self) -> &'static str;

    /// Handle one event.
    ///
    /// An error aborts the remaining handlers registered for this event's
    /// kind; effects of handlers that already ran are not rolled back.
    fn handle(&self, event: &E) -> anyhow::Result<()>;
}
