use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, EntityId};
use storefront_events::Event;

use crate::address::Address;

/// Customer identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub EntityId);

impl CustomerId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Entity: Customer.
///
/// A customer starts inactive and without an address; it can only be
/// activated once an address is on file. State transitions that other parts
/// of the system react to return the corresponding event - the caller decides
/// whether to notify it on a dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: CustomerId,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: u64,
}

impl Customer {
    /// Create a customer with the given identity and name.
    pub fn new(id: CustomerId, name: String) -> DomainResult<Self> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        Ok(Self {
            id,
            name,
            address: None,
            active: false,
            reward_points: 0,
        })
    }

    pub fn id_typed(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reward_points(&self) -> u64 {
        self.reward_points
    }

    /// Rename the customer. Blank names are rejected.
    pub fn change_name(&mut self, name: String) -> DomainResult<()> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        self.name = name;
        Ok(())
    }

    /// Move the customer to a new address and return the resulting event.
    pub fn change_address(&mut self, address: Address) -> CustomerEvent {
        self.address = Some(address.clone());

        CustomerEvent::CustomerAddressChanged(CustomerAddressChanged {
            customer_id: self.id,
            name: self.name.clone(),
            address,
            occurred_at: Utc::now(),
        })
    }

    /// Activate the customer.
    ///
    /// Invariant: an address must be on file before activation.
    pub fn activate(&mut self) -> DomainResult<()> {
        if self.address.is_none() {
            return Err(DomainError::invariant(
                "an address is required to activate a customer",
            ));
        }
        self.active = true;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Accumulate reward points.
    pub fn add_reward_points(&mut self, points: u64) {
        self.reward_points += points;
    }

    /// The creation fact for this customer, dispatched after it is first
    /// persisted.
    pub fn created_event(&self) -> CustomerEvent {
        CustomerEvent::CustomerCreated(CustomerCreated {
            customer_id: self.id,
            name: self.name.clone(),
            occurred_at: Utc::now(),
        })
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Event: CustomerCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCreated {
    pub customer_id: CustomerId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CustomerAddressChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAddressChanged {
    pub customer_id: CustomerId,
    pub name: String,
    pub address: Address,
    pub occurred_at: DateTime<Utc>,
}

/// Discriminant for [`CustomerEvent`], used as dispatcher registry key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerEventKind {
    Created,
    AddressChanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerEvent {
    CustomerCreated(CustomerCreated),
    CustomerAddressChanged(CustomerAddressChanged),
}

impl Event for CustomerEvent {
    type Kind = CustomerEventKind;

    fn kind(&self) -> CustomerEventKind {
        match self {
            CustomerEvent::CustomerCreated(_) => CustomerEventKind::Created,
            CustomerEvent::CustomerAddressChanged(_) => CustomerEventKind::AddressChanged,
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            CustomerEvent::CustomerCreated(_) => "customers.customer.created",
            CustomerEvent::CustomerAddressChanged(_) => "customers.customer.address_changed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CustomerEvent::CustomerCreated(e) => e.occurred_at,
            CustomerEvent::CustomerAddressChanged(e) => e.occurred_at,
        }
    }
}
