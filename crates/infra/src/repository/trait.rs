use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fulfillment_core::OrderId;
use fulfillment_orders::Order;

/// An order as recorded by a repository.
///
/// Created on `save` and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedOrderRecord {
    pub order_id: OrderId,
    pub customer_id: String,
    /// Payable amount: subtotal − discount + shipping.
    pub total: Decimal,
    pub recorded_at: DateTime<Utc>,
}

/// Repository operation error.
///
/// A failed `save` means the order was **not** recorded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Persistence boundary for processed orders.
///
/// ## Contract
///
/// `save()`:
/// - records the order's customer and computed total
/// - assigns an identifier strictly greater than every identifier previously
///   assigned by the same instance, starting at 1
/// - must not fail for a structurally valid order except on a storage failure
/// - must keep identifiers unique and increasing under concurrent callers
///
/// `get()`:
/// - returns the record saved under `order_id`, or `None` if there is none
pub trait OrderRepository: Send + Sync {
    fn save(&self, order: &Order, total: Decimal) -> Result<OrderId, RepositoryError>;

    fn get(&self, order_id: OrderId) -> Result<Option<PersistedOrderRecord>, RepositoryError>;
}

impl<R> OrderRepository for Arc<R>
where
    R: OrderRepository + ?Sized,
{
    fn save(&self, order: &Order, total: Decimal) -> Result<OrderId, RepositoryError> {
        (**self).save(order, total)
    }

    fn get(&self, order_id: OrderId) -> Result<Option<PersistedOrderRecord>, RepositoryError> {
        (**self).get(order_id)
    }
}
