use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, EntityId};
use storefront_customers::CustomerId;
use storefront_events::Event;
use storefront_products::ProductId;

/// Order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub EntityId);

impl OrderId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Order line: a product snapshot, its unit price and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    product_id: ProductId,
    name: String,
    /// Unit price in smallest currency unit (e.g., cents).
    price: u64,
    quantity: u32,
}

impl OrderItem {
    /// Create an order item. Quantity must be greater than zero.
    pub fn new(product_id: ProductId, name: String, price: u64, quantity: u32) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be greater than zero"));
        }

        Ok(Self {
            product_id,
            name,
            price,
            quantity,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price in smallest currency unit (e.g., cents).
    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Line total: unit price times quantity.
    pub fn total(&self) -> u64 {
        self.price * u64::from(self.quantity)
    }
}

/// Entity: Order.
///
/// An order belongs to a customer and holds at least one item. Items are
/// fixed at construction; the total is derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    items: Vec<OrderItem>,
}

impl Order {
    /// Create an order. At least one item is required.
    pub fn new(id: OrderId, customer_id: CustomerId, items: Vec<OrderItem>) -> DomainResult<Self> {
        if items.is_empty() {
            return Err(DomainError::validation(
                "an order requires at least one item",
            ));
        }

        Ok(Self {
            id,
            customer_id,
            items,
        })
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Order total: the sum of all line totals.
    pub fn total(&self) -> u64 {
        self.items.iter().map(OrderItem::total).sum()
    }

    /// The placement fact for this order, dispatched after it is first
    /// persisted.
    pub fn placed_event(&self) -> OrderEvent {
        OrderEvent::OrderPlaced(OrderPlaced {
            order_id: self.id,
            customer_id: self.customer_id,
            total: self.total(),
            occurred_at: Utc::now(),
        })
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Event: OrderPlaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    /// Order total in smallest currency unit (e.g., cents).
    pub total: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Discriminant for [`OrderEvent`], used as dispatcher registry key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderEventKind {
    Placed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderEvent {
    OrderPlaced(OrderPlaced),
}

impl Event for OrderEvent {
    type Kind = OrderEventKind;

    fn kind(&self) -> OrderEventKind {
        match self {
            OrderEvent::OrderPlaced(_) => OrderEventKind::Placed,
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderPlaced(_) => "orders.order.placed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OrderEvent::OrderPlaced(e) => e.occurred_at,
        }
    }
}
