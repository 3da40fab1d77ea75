use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, EntityId};
use storefront_events::Event;

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub EntityId);

impl ProductId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Entity: Product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    /// Price in smallest currency unit (e.g., cents).
    price: u64,
}

impl Product {
    /// Create a product. Name and description must be non-blank, the price
    /// must be greater than zero.
    pub fn new(id: ProductId, name: String, description: String, price: u64) -> DomainResult<Self> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if description.trim().is_empty() {
            return Err(DomainError::validation("description cannot be empty"));
        }
        if price == 0 {
            return Err(DomainError::validation("price must be greater than zero"));
        }

        Ok(Self {
            id,
            name,
            description,
            price,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Price in smallest currency unit (e.g., cents).
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Rename the product. Blank names are rejected.
    pub fn change_name(&mut self, name: String) -> DomainResult<()> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        self.name = name;
        Ok(())
    }

    /// Reprice the product. A zero price is rejected.
    pub fn change_price(&mut self, price: u64) -> DomainResult<()> {
        if price == 0 {
            return Err(DomainError::validation("price must be greater than zero"));
        }
        self.price = price;
        Ok(())
    }

    /// The creation fact for this product, dispatched after it is first
    /// persisted.
    pub fn created_event(&self) -> ProductEvent {
        ProductEvent::ProductCreated(ProductCreated {
            product_id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            occurred_at: Utc::now(),
        })
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Event: ProductCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCreated {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    /// Price in smallest currency unit (e.g., cents).
    pub price: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Discriminant for [`ProductEvent`], used as dispatcher registry key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductEventKind {
    Created,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductEvent {
    ProductCreated(ProductCreated),
}

impl Event for ProductEvent {
    type Kind = ProductEventKind;

    fn kind(&self) -> ProductEventKind {
        match self {
            ProductEvent::ProductCreated(_) => ProductEventKind::Created,
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::ProductCreated(_) => "products.product.created",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProductEvent::ProductCreated(e) => e.occurred_at,
        }
    }
}
