//! Concrete event handlers.
//!
//! Every handler here subscribes to exactly one event kind and ignores the
//! rest of the stream, so registering one under the wrong kind is harmless.
//! Side effects are traced rather than performed: the email handlers stand in
//! for a real mailer integration.

use storefront_customers::CustomerEvent;
use storefront_events::EventHandler;
use storefront_orders::OrderEvent;
use storefront_products::ProductEvent;

use crate::events::StoreEvent;

/// Sends the product-created notification mail.
#[derive(Debug, Default)]
pub struct SendEmailOnProductCreated;

impl EventHandler<StoreEvent> for SendEmailOnProductCreated {
    fn name(&self) -> &'static str {
        "send_email_on_product_created"
    }

    fn handle(&self, event: &StoreEvent) -> anyhow::Result<()> {
        if let StoreEvent::Product(ProductEvent::ProductCreated(e)) = event {
            tracing::info!(
                product_id = %e.product_id,
                name = %e.name,
                price = e.price,
                "sending product created email"
            );
        }
        Ok(())
    }
}

/// Logs every newly registered customer.
#[derive(Debug, Default)]
pub struct LogCustomerCreated;

impl EventHandler<StoreEvent> for LogCustomerCreated {
    fn name(&self) -> &'static str {
        "log_customer_created"
    }

    fn handle(&self, event: &StoreEvent) -> anyhow::Result<()> {
        if let StoreEvent::Customer(CustomerEvent::CustomerCreated(e)) = event {
            tracing::info!(customer_id = %e.customer_id, name = %e.name, "customer created");
        }
        Ok(())
    }
}

/// Sends the welcome mail to a newly registered customer.
///
/// Registered alongside [`LogCustomerCreated`] for the same kind; the
/// dispatcher runs them in registration order.
#[derive(Debug, Default)]
pub struct SendWelcomeEmailOnCustomerCreated;

impl EventHandler<StoreEvent> for SendWelcomeEmailOnCustomerCreated {
    fn name(&self) -> &'static str {
        "send_welcome_email_on_customer_created"
    }

    fn handle(&self, event: &StoreEvent) -> anyhow::Result<()> {
        if let StoreEvent::Customer(CustomerEvent::CustomerCreated(e)) = event {
            tracing::info!(customer_id = %e.customer_id, name = %e.name, "sending welcome email");
        }
        Ok(())
    }
}

/// Logs the new address whenever a customer moves.
#[derive(Debug, Default)]
pub struct LogCustomerAddressChanged;

impl EventHandler<StoreEvent> for LogCustomerAddressChanged {
    fn name(&self) -> &'static str {
        "log_customer_address_changed"
    }

    fn handle(&self, event: &StoreEvent) -> anyhow::Result<()> {
        if let StoreEvent::Customer(CustomerEvent::CustomerAddressChanged(e)) = event {
            tracing::info!(
                customer_id = %e.customer_id,
                name = %e.name,
                address = %e.address,
                "customer address changed"
            );
        }
        Ok(())
    }
}

/// Logs placed orders with their totals.
#[derive(Debug, Default)]
pub struct LogOrderPlaced;

impl EventHandler<StoreEvent> for LogOrderPlaced {
    fn name(&self) -> &'static str {
        "log_order_placed"
    }

    fn handle(&self, event: &StoreEvent) -> anyhow::Result<()> {
        if let StoreEvent::Order(OrderEvent::OrderPlaced(e)) = event {
            tracing::info!(
                order_id = %e.order_id,
                customer_id = %e.customer_id,
                total = e.total,
                "order placed"
            );
        }
        Ok(())
    }
}
