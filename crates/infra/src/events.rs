//! The storefront's unified event stream.
//!
//! Each domain crate defines its own event enum. This module folds them into
//! one closed sum, [`StoreEvent`], so a single dispatcher instance can route
//! every event in the system. `From` impls keep the domain crates unaware of
//! the unification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_customers::{CustomerEvent, CustomerEventKind};
use storefront_events::Event;
use storefront_orders::{OrderEvent, OrderEventKind};
use storefront_products::{ProductEvent, ProductEventKind};

/// Registry key for [`StoreEvent`]. Mirrors its variant structure without the
/// payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreEventKind {
    Customer(CustomerEventKind),
    Product(ProductEventKind),
    Order(OrderEventKind),
}

/// Every event the storefront can raise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StoreEvent {
    Customer(CustomerEvent),
    Product(ProductEvent),
    Order(OrderEvent),
}

impl From<CustomerEvent> for StoreEvent {
    fn from(event: CustomerEvent) -> Self {
        StoreEvent::Customer(event)
    }
}

impl From<ProductEvent> for StoreEvent {
    fn from(event: ProductEvent) -> Self {
        StoreEvent::Product(event)
    }
}

impl From<OrderEvent> for StoreEvent {
    fn from(event: OrderEvent) -> Self {
        StoreEvent::Order(event)
    }
}

impl Event for StoreEvent {
    type Kind = StoreEventKind;

    fn kind(&self) -> StoreEventKind {
        match self {
            StoreEvent::Customer(e) => StoreEventKind::Customer(e.kind()),
            StoreEvent::Product(e) => StoreEventKind::Product(e.kind()),
            StoreEvent::Order(e) => StoreEventKind::Order(e.kind()),
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            StoreEvent::Customer(e) => e.event_type(),
            StoreEvent::Product(e) => e.event_type(),
            StoreEvent::Order(e) => e.event_type(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            StoreEvent::Customer(e) => e.occurred_at(),
            StoreEvent::Product(e) => e.occurred_at(),
            StoreEvent::Order(e) => e.occurred_at(),
        }
    }
}
