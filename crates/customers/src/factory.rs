use storefront_core::{DomainResult, EntityId};

use crate::address::Address;
use crate::customer::{Customer, CustomerId};

/// Builds customers with freshly generated identifiers.
pub struct CustomerFactory;

impl CustomerFactory {
    /// Create a customer with a fresh id and no address.
    pub fn create(name: String) -> DomainResult<Customer> {
        Customer::new(CustomerId::new(EntityId::new()), name)
    }

    /// Create a customer with a fresh id and an address already on file.
    ///
    /// The initial address is construction state, not a change: the
    /// address-changed event it would produce is discarded.
    pub fn create_with_address(name: String, address: Address) -> DomainResult<Customer> {
        let mut customer = Self::create(name)?;
        let _ = customer.change_address(address);
        Ok(customer)
    }
}
