//! In-memory repositories.
//!
//! A repository owns no dispatcher; it holds a shared handle to the one
//! dispatcher built at the composition root and announces the creation fact
//! after a successful insert. Reads and updates stay silent.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use storefront_core::Entity;
use storefront_customers::Customer;
use storefront_events::{DispatchError, EventDispatcher};
use storefront_orders::Order;
use storefront_products::Product;

use crate::events::StoreEvent;

/// Error surfaced by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("entity not found")]
    NotFound,

    #[error("entity already exists: {0}")]
    Conflict(String),

    #[error("repository lock poisoned")]
    Poisoned,

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Persistence port for one entity type.
pub trait Repository<T: Entity> {
    /// Persist a new entity and announce its creation event.
    ///
    /// Fails with [`RepositoryError::Conflict`] when the id is already taken.
    /// If a creation handler fails, the entity stays persisted and the
    /// dispatch error is surfaced to the caller.
    fn create(&self, entity: T) -> Result<(), RepositoryError>;

    /// Replace an already-persisted entity. No event is announced.
    fn update(&self, entity: T) -> Result<(), RepositoryError>;

    /// Fetch one entity by id.
    fn find(&self, id: &T::Id) -> Result<T, RepositoryError>;

    /// Fetch every persisted entity, in no particular order.
    fn find_all(&self) -> Result<Vec<T>, RepositoryError>;
}

/// The fact announced when an entity is first persisted.
///
/// Implemented per entity so [`InMemoryRepository`] stays generic over what
/// it stores.
pub trait CreationEvent {
    fn creation_event(&self) -> StoreEvent;
}

impl CreationEvent for Customer {
    fn creation_event(&self) -> StoreEvent {
        StoreEvent::Customer(self.created_event())
    }
}

impl CreationEvent for Product {
    fn creation_event(&self) -> StoreEvent {
        StoreEvent::Product(self.created_event())
    }
}

impl CreationEvent for Order {
    fn creation_event(&self) -> StoreEvent {
        StoreEvent::Order(self.placed_event())
    }
}

/// Map-backed repository for tests and single-process deployments.
pub struct InMemoryRepository<T: Entity> {
    entities: RwLock<HashMap<T::Id, T>>,
    dispatcher: Arc<EventDispatcher<StoreEvent>>,
}

pub type InMemoryCustomerRepository = InMemoryRepository<Customer>;
pub type InMemoryProductRepository = InMemoryRepository<Product>;
pub type InMemoryOrderRepository = InMemoryRepository<Order>;

impl<T: Entity> InMemoryRepository<T> {
    pub fn new(dispatcher: Arc<EventDispatcher<StoreEvent>>) -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
            dispatcher,
        }
    }
}

impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Entity + Clone + CreationEvent,
    T::Id: core::fmt::Display,
{
    fn create(&self, entity: T) -> Result<(), RepositoryError> {
        let event = entity.creation_event();
        {
            let mut entities = self
                .entities
                .write()
                .map_err(|_| RepositoryError::Poisoned)?;
            if entities.contains_key(entity.id()) {
                return Err(RepositoryError::Conflict(entity.id().to_string()));
            }
            entities.insert(entity.id().clone(), entity);
        }

        // The write lock is released before fan-out so handlers can read the
        // repository back.
        self.dispatcher.notify(&event)?;
        Ok(())
    }

    fn update(&self, entity: T) -> Result<(), RepositoryError> {
        let mut entities = self
            .entities
            .write()
            .map_err(|_| RepositoryError::Poisoned)?;
        if !entities.contains_key(entity.id()) {
            return Err(RepositoryError::NotFound);
        }
        entities.insert(entity.id().clone(), entity);
        Ok(())
    }

    fn find(&self, id: &T::Id) -> Result<T, RepositoryError> {
        let entities = self
            .entities
            .read()
            .map_err(|_| RepositoryError::Poisoned)?;
        entities.get(id).cloned().ok_or(RepositoryError::NotFound)
    }

    fn find_all(&self) -> Result<Vec<T>, RepositoryError> {
        let entities = self
            .entities
            .read()
            .map_err(|_| RepositoryError::Poisoned)?;
        Ok(entities.values().cloned().collect())
    }
}
