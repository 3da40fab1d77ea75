//! Customers domain module.
//!
//! This crate contains business rules for customers, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage). State transitions
//! return events; dispatching them is the caller's concern.

pub mod address;
pub mod customer;
pub mod factory;

pub use address::Address;
pub use customer::{
    Customer, CustomerAddressChanged, CustomerCreated, CustomerEvent, CustomerEventKind,
    CustomerId,
};
pub use factory::CustomerFactory;
