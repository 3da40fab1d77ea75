use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ValueObject};

/// Postal address of a customer.
///
/// Value object: compared by value, immutable once constructed. [`Address::new`]
/// rejects blank components and a zero street number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    street: String,
    number: u32,
    zip: String,
    city: String,
}

impl Address {
    pub fn new(street: String, number: u32, zip: String, city: String) -> DomainResult<Self> {
        if street.trim().is_empty() {
            return Err(DomainError::validation("street cannot be empty"));
        }
        if number == 0 {
            return Err(DomainError::validation("number must be greater than zero"));
        }
        if zip.trim().is_empty() {
            return Err(DomainError::validation("zip cannot be empty"));
        }
        if city.trim().is_empty() {
            return Err(DomainError::validation("city cannot be empty"));
        }

        Ok(Self {
            street,
            number,
            zip,
            city,
        })
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl ValueObject for Address {}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}, {}, {} {}",
            self.street, self.number, self.zip, self.city
        )
    }
}
