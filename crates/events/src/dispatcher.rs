//! Synchronous in-process event dispatch.
//!
//! [`EventDispatcher`] keeps an ordered handler list per event kind and fans
//! each notified event out to the handlers registered for that kind, on the
//! caller's stack. Registration order is delivery order. The dispatcher does
//! not persist events and gives no delivery guarantee beyond the synchronous
//! call itself.
//!
//! There is deliberately no global instance: the composition root owns the
//! dispatcher, registers handlers while it still has exclusive access, and
//! then shares it (typically behind an `Arc`) with everything that notifies.
//! Registration takes `&mut self`, so a shared dispatcher is read-only.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::{Event, EventHandler};

/// Error surfaced by [`EventDispatcher::notify`].
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A handler returned an error; remaining handlers were not invoked.
    #[error("handler {handler} failed for {event_type}: {source}")]
    HandlerFailed {
        handler: &'static str,
        event_type: &'static str,
        source: anyhow::Error,
    },
}

/// Routes events to the handlers registered for their kind.
///
/// Handlers are stored per kind, in registration order, and a handler may be
/// registered for several kinds (or several times for one kind - it then runs
/// once per registration). Handler identity is `Arc` identity: two `Arc`s
/// pointing at the same allocation are the same handler, two allocations of
/// the same type are not.
pub struct EventDispatcher<E: Event> {
    handlers: HashMap<E::Kind, Vec<Arc<dyn EventHandler<E>>>>,
}

impl<E: Event> EventDispatcher<E> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Append `handler` to the list for `kind`, creating the list if absent.
    pub fn register(&mut self, kind: E::Kind, handler: Arc<dyn EventHandler<E>>) {
        tracing::debug!(?kind, handler = handler.name(), "registering event handler");
        self.handlers.entry(kind).or_default().push(handler);
    }

    /// Remove every registration of `handler` for `kind`.
    ///
    /// Unknown kinds and unregistered handlers are ignored. A kind whose last
    /// handler is removed keeps an empty entry; only [`unregister_all`] makes
    /// kinds absent again.
    ///
    /// [`unregister_all`]: EventDispatcher::unregister_all
    pub fn unregister(&mut self, kind: E::Kind, handler: &Arc<dyn EventHandler<E>>) {
        if let Some(registered) = self.handlers.get_mut(&kind) {
            registered.retain(|candidate| !same_handler(candidate, handler));
        }
    }

    /// Drop every handler registration for every kind.
    pub fn unregister_all(&mut self) {
        self.handlers.clear();
    }

    /// Handlers registered for `kind`, in registration order.
    ///
    /// Returns `None` for a kind that was never registered (or was cleared by
    /// [`unregister_all`]), and `Some(&[])` for a kind whose handlers were all
    /// removed one by one.
    ///
    /// [`unregister_all`]: EventDispatcher::unregister_all
    pub fn handlers(&self, kind: E::Kind) -> Option<&[Arc<dyn EventHandler<E>>]> {
        self.handlers.get(&kind).map(Vec::as_slice)
    }

    /// Synchronously invoke every handler registered for the event's kind,
    /// in registration order.
    ///
    /// Notifying an event whose kind has no handlers is a no-op. The first
    /// handler error aborts the remaining handlers and is returned to the
    /// caller; effects of handlers that already ran stand.
    pub fn notify(&self, event: &E) -> Result<(), DispatchError> {
        let Some(handlers) = self.handlers.get(&event.kind()) else {
            return Ok(());
        };

        tracing::debug!(
            event_type = event.event_type(),
            handlers = handlers.len(),
            "dispatching event"
        );

        for handler in handlers {
            handler
                .handle(event)
                .map_err(|source| DispatchError::HandlerFailed {
                    handler: handler.name(),
                    event_type: event.event_type(),
                    source,
                })?;
        }

        Ok(())
    }
}

impl<E: Event> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> core::fmt::Debug for EventDispatcher<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let entries: Vec<(&E::Kind, Vec<&'static str>)> = self
            .handlers
            .iter()
            .map(|(kind, registered)| (kind, registered.iter().map(|h| h.name()).collect()))
            .collect();
        f.debug_struct("EventDispatcher")
            .field("handlers", &entries)
            .finish()
    }
}

/// `Arc` identity, ignoring the vtable half of the fat pointer.
fn same_handler<E: Event>(a: &Arc<dyn EventHandler<E>>, b: &Arc<dyn EventHandler<E>>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::{DateTime, Utc};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum ProbeKind {
        Ping,
        Pong,
    }

    #[derive(Debug, Clone)]
    struct ProbeEvent {
        kind: ProbeKind,
        occurred_at: DateTime<Utc>,
    }

    impl ProbeEvent {
        fn ping() -> Self {
            Self {
                kind: ProbeKind::Ping,
                occurred_at: Utc::now(),
            }
        }

        fn pong() -> Self {
            Self {
                kind: ProbeKind::Pong,
                occurred_at: Utc::now(),
            }
        }
    }

    impl Event for ProbeEvent {
        type Kind = ProbeKind;

        fn kind(&self) -> ProbeKind {
            self.kind
        }

        fn event_type(&self) -> &'static str {
            match self.kind {
                ProbeKind::Ping => "probe.ping",
                ProbeKind::Pong => "probe.pong",
            }
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.occurred_at
        }
    }

    /// Appends its name to a shared log on every invocation.
    struct Recording {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl EventHandler<ProbeEvent> for Recording {
        fn name(&self) -> &'static str {
            self.name
        }

        fn handle(&self, _event: &ProbeEvent) -> anyhow::Result<()> {
            self.log.lock().unwrap().push(self.name);
            Ok(())
        }
    }

    struct Failing;

    impl EventHandler<ProbeEvent> for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn handle(&self, _event: &ProbeEvent) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("boom"))
        }
    }

    fn shared_log() -> Arc<Mutex<Vec<&'static str>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn recording(
        name: &'static str,
        log: &Arc<Mutex<Vec<&'static str>>>,
    ) -> Arc<dyn EventHandler<ProbeEvent>> {
        Arc::new(Recording {
            name,
            log: log.clone(),
        })
    }

    #[test]
    fn register_appends_handler_for_kind() {
        let mut dispatcher = EventDispatcher::<ProbeEvent>::new();
        let log = shared_log();
        let handler = recording("h1", &log);

        dispatcher.register(ProbeKind::Ping, handler.clone());

        let registered = dispatcher.handlers(ProbeKind::Ping).unwrap();
        assert_eq!(registered.len(), 1);
        assert!(std::ptr::addr_eq(
            Arc::as_ptr(registered.last().unwrap()),
            Arc::as_ptr(&handler)
        ));
    }

    #[test]
    fn register_keeps_registration_order() {
        let mut dispatcher = EventDispatcher::<ProbeEvent>::new();
        let log = shared_log();
        let first = recording("h1", &log);
        let second = recording("h2", &log);

        dispatcher.register(ProbeKind::Ping, first);
        dispatcher.register(ProbeKind::Ping, second.clone());

        let registered = dispatcher.handlers(ProbeKind::Ping).unwrap();
        assert_eq!(registered.len(), 2);
        assert!(std::ptr::addr_eq(
            Arc::as_ptr(registered.last().unwrap()),
            Arc::as_ptr(&second)
        ));
    }

    #[test]
    fn duplicate_registration_runs_handler_once_per_registration() {
        let mut dispatcher = EventDispatcher::<ProbeEvent>::new();
        let log = shared_log();
        let handler = recording("h1", &log);

        dispatcher.register(ProbeKind::Ping, handler.clone());
        dispatcher.register(ProbeKind::Ping, handler);

        dispatcher.notify(&ProbeEvent::ping()).unwrap();

        assert_eq!(log.lock().unwrap().as_slice(), ["h1", "h1"]);
    }

    #[test]
    fn notify_invokes_handlers_in_registration_order() {
        let mut dispatcher = EventDispatcher::<ProbeEvent>::new();
        let log = shared_log();
        dispatcher.register(ProbeKind::Ping, recording("h1", &log));
        dispatcher.register(ProbeKind::Ping, recording("h2", &log));

        dispatcher.notify(&ProbeEvent::ping()).unwrap();

        assert_eq!(log.lock().unwrap().as_slice(), ["h1", "h2"]);
    }

    #[test]
    fn notify_without_handlers_is_a_noop() {
        let dispatcher = EventDispatcher::<ProbeEvent>::new();

        dispatcher.notify(&ProbeEvent::ping()).unwrap();
    }

    #[test]
    fn notify_only_reaches_handlers_for_the_event_kind() {
        let mut dispatcher = EventDispatcher::<ProbeEvent>::new();
        let log = shared_log();
        dispatcher.register(ProbeKind::Ping, recording("ping-only", &log));

        dispatcher.notify(&ProbeEvent::pong()).unwrap();
        assert!(log.lock().unwrap().is_empty());

        dispatcher.notify(&ProbeEvent::ping()).unwrap();
        assert_eq!(log.lock().unwrap().as_slice(), ["ping-only"]);
    }

    #[test]
    fn notify_stops_at_the_first_failing_handler() {
        let mut dispatcher = EventDispatcher::<ProbeEvent>::new();
        let log = shared_log();
        dispatcher.register(ProbeKind::Ping, recording("before", &log));
        dispatcher.register(ProbeKind::Ping, Arc::new(Failing));
        dispatcher.register(ProbeKind::Ping, recording("after", &log));

        let err = dispatcher.notify(&ProbeEvent::ping()).unwrap_err();

        let DispatchError::HandlerFailed {
            handler,
            event_type,
            source,
        } = err;
        assert_eq!(handler, "failing");
        assert_eq!(event_type, "probe.ping");
        assert_eq!(source.to_string(), "boom");

        // The handler before the failure ran; the one after did not.
        assert_eq!(log.lock().unwrap().as_slice(), ["before"]);
    }

    #[test]
    fn unregister_removes_every_occurrence_of_the_handler() {
        let mut dispatcher = EventDispatcher::<ProbeEvent>::new();
        let log = shared_log();
        let doubled = recording("doubled", &log);
        let kept = recording("kept", &log);

        dispatcher.register(ProbeKind::Ping, doubled.clone());
        dispatcher.register(ProbeKind::Ping, kept);
        dispatcher.register(ProbeKind::Ping, doubled.clone());

        dispatcher.unregister(ProbeKind::Ping, &doubled);

        dispatcher.notify(&ProbeEvent::ping()).unwrap();
        assert_eq!(log.lock().unwrap().as_slice(), ["kept"]);
    }

    #[test]
    fn unregister_distinguishes_allocations_not_types() {
        let mut dispatcher = EventDispatcher::<ProbeEvent>::new();
        let log = shared_log();
        let registered = recording("h1", &log);
        let lookalike = recording("h1", &log);

        dispatcher.register(ProbeKind::Ping, registered);
        dispatcher.unregister(ProbeKind::Ping, &lookalike);

        assert_eq!(dispatcher.handlers(ProbeKind::Ping).unwrap().len(), 1);
    }

    #[test]
    fn unregister_leaves_an_empty_entry_behind() {
        let mut dispatcher = EventDispatcher::<ProbeEvent>::new();
        let log = shared_log();
        let handler = recording("h1", &log);

        dispatcher.register(ProbeKind::Ping, handler.clone());
        dispatcher.unregister(ProbeKind::Ping, &handler);

        // Empty-but-present: the kind is still known to the dispatcher.
        let registered = dispatcher.handlers(ProbeKind::Ping).unwrap();
        assert!(registered.is_empty());

        dispatcher.notify(&ProbeEvent::ping()).unwrap();
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn unregister_for_unknown_kind_is_a_noop() {
        let mut dispatcher = EventDispatcher::<ProbeEvent>::new();
        let log = shared_log();
        let handler = recording("h1", &log);

        dispatcher.unregister(ProbeKind::Pong, &handler);

        assert!(dispatcher.handlers(ProbeKind::Pong).is_none());
    }

    #[test]
    fn unregister_all_makes_every_kind_absent() {
        let mut dispatcher = EventDispatcher::<ProbeEvent>::new();
        let log = shared_log();
        dispatcher.register(ProbeKind::Ping, recording("h1", &log));
        dispatcher.register(ProbeKind::Pong, recording("h2", &log));

        dispatcher.unregister_all();

        // Absent, not empty-but-present.
        assert!(dispatcher.handlers(ProbeKind::Ping).is_none());
        assert!(dispatcher.handlers(ProbeKind::Pong).is_none());

        dispatcher.notify(&ProbeEvent::ping()).unwrap();
        dispatcher.notify(&ProbeEvent::pong()).unwrap();
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn dispatcher_is_reusable_after_unregister_all() {
        let mut dispatcher = EventDispatcher::<ProbeEvent>::new();
        let log = shared_log();
        dispatcher.register(ProbeKind::Ping, recording("h1", &log));
        dispatcher.unregister_all();

        dispatcher.register(ProbeKind::Ping, recording("h2", &log));
        dispatcher.notify(&ProbeEvent::ping()).unwrap();

        assert_eq!(log.lock().unwrap().as_slice(), ["h2"]);
    }

    #[test]
    fn handlers_returns_none_for_unknown_kind() {
        let dispatcher = EventDispatcher::<ProbeEvent>::new();

        assert!(dispatcher.handlers(ProbeKind::Ping).is_none());
    }

    #[test]
    fn one_handler_can_serve_multiple_kinds() {
        let mut dispatcher = EventDispatcher::<ProbeEvent>::new();
        let log = shared_log();
        let handler = recording("both", &log);

        dispatcher.register(ProbeKind::Ping, handler.clone());
        dispatcher.register(ProbeKind::Pong, handler.clone());

        dispatcher.notify(&ProbeEvent::ping()).unwrap();
        dispatcher.notify(&ProbeEvent::pong()).unwrap();
        assert_eq!(log.lock().unwrap().as_slice(), ["both", "both"]);

        // Unregistering for one kind leaves the other registration alone.
        dispatcher.unregister(ProbeKind::Ping, &handler);
        assert!(dispatcher.handlers(ProbeKind::Ping).unwrap().is_empty());
        assert_eq!(dispatcher.handlers(ProbeKind::Pong).unwrap().len(), 1);
    }

    #[test]
    fn shared_dispatcher_notifies_from_multiple_threads() {
        let mut dispatcher = EventDispatcher::<ProbeEvent>::new();
        let log = shared_log();
        dispatcher.register(ProbeKind::Ping, recording("h1", &log));
        let dispatcher = Arc::new(dispatcher);

        let threads: Vec<_> = (0..4)
            .map(|_| {
                let dispatcher = dispatcher.clone();
                std::thread::spawn(move || dispatcher.notify(&ProbeEvent::ping()).unwrap())
            })
            .collect();
        for thread in threads {
            thread.join().unwrap();
        }

        assert_eq!(log.lock().unwrap().len(), 4);
    }
}
