use rust_decimal::Decimal;

use fulfillment_core::OrderId;

use super::r#trait::{NotificationDispatcher, NotificationError};

/// Notifier that emits the order confirmation as a structured `tracing` event.
///
/// Stands in for real transports during development; `channel` labels what
/// the confirmation would have gone out on (e.g. `console`, `email`).
#[derive(Debug, Clone)]
pub struct LogNotifier {
    channel: String,
}

impl LogNotifier {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
        }
    }

    pub fn console() -> Self {
        Self::new("console")
    }

    pub fn email() -> Self {
        Self::new("email")
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self::console()
    }
}

impl NotificationDispatcher for LogNotifier {
    fn notify(
        &self,
        customer_id: &str,
        order_id: OrderId,
        total: Decimal,
    ) -> Result<(), NotificationError> {
        tracing::info!(
            channel = %self.channel,
            customer_id,
            order_id = order_id.get(),
            total = %total,
            "order confirmation sent"
        );
        Ok(())
    }
}
