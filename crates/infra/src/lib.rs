//! Infrastructure layer: the unified event stream, concrete handlers,
//! in-memory repositories and telemetry.
//!
//! This crate is the composition layer. The domain crates each raise their
//! own events; here they are folded into [`StoreEvent`] so one dispatcher
//! built at the composition root can route all of them.

pub mod events;
pub mod handlers;
pub mod repository;
pub mod telemetry;


pub use events::{StoreEvent, StoreEventKind};
pub use handlers::{
    LogCustomerAddressChanged, LogCustomerCreated, LogOrderPlaced, SendEmailOnProductCreated,
    SendWelcomeEmailOnCustomerCreated,
};
pub use repository::{
    CreationEvent, InMemoryCustomerRepository, InMemoryOrderRepository, InMemoryProductRepository,
    InMemoryRepository, Repository, RepositoryError,
};
