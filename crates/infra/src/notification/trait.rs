use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use fulfillment_core::OrderId;

/// Notification dispatch error.
///
/// Raised after the order was already recorded; the failure is reported, not retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationError {
    #[error("notification dispatch failed: {0}")]
    Dispatch(String),
}

/// Informs a customer that their order was processed.
///
/// Implementations perform the dispatch exactly once per call and surface any
/// transport failure to the caller.
pub trait NotificationDispatcher: Send + Sync {
    fn notify(
        &self,
        customer_id: &str,
        order_id: OrderId,
        total: Decimal,
    ) -> Result<(), NotificationError>;
}

impl<N> NotificationDispatcher for Arc<N>
where
    N: NotificationDispatcher + ?Sized,
{
    fn notify(
        &self,
        customer_id: &str,
        order_id: OrderId,
        total: Decimal,
    ) -> Result<(), NotificationError> {
        (**self).notify(customer_id, order_id, total)
    }
}
