//! `storefront-events` — synchronous in-process event dispatch.
//!
//! Domain crates define their events and implement [`Event`]; infrastructure
//! implements [`EventHandler`] for the side effects; the composition root
//! owns the [`EventDispatcher`], registers handlers, and hands it out.

pub mod dispatcher;
pub mod event;
pub mod handler;

pub use dispatcher::{DispatchError, EventDispatcher};
pub use event::Event;
pub use handler::EventHandler;
