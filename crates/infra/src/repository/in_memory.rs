use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::Utc;
use rust_decimal::Decimal;

use fulfillment_core::OrderId;
use fulfillment_orders::Order;

use super::r#trait::{OrderRepository, PersistedOrderRecord, RepositoryError};

#[derive(Debug)]
struct State {
    next_id: Option<OrderId>,
    records: BTreeMap<OrderId, PersistedOrderRecord>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            next_id: Some(OrderId::FIRST),
            records: BTreeMap::new(),
        }
    }
}

/// In-memory order repository.
///
/// Intended for tests/dev. The id counter and the record map live behind one
/// lock, so id assignment and insertion happen atomically.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    state: RwLock<State>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded orders.
    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.read()?.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }

    /// All records, ordered by id.
    pub fn records(&self) -> Result<Vec<PersistedOrderRecord>, RepositoryError> {
        Ok(self.read()?.records.values().cloned().collect())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, State>, RepositoryError> {
        self.state
            .read()
            .map_err(|_| RepositoryError::Storage("lock poisoned".to_string()))
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn save(&self, order: &Order, total: Decimal) -> Result<OrderId, RepositoryError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| RepositoryError::Storage("lock poisoned".to_string()))?;

        let order_id = state
            .next_id
            .ok_or_else(|| RepositoryError::Storage("order id space exhausted".to_string()))?;

        state.records.insert(
            order_id,
            PersistedOrderRecord {
                order_id,
                customer_id: order.customer_id().to_string(),
                total,
                recorded_at: Utc::now(),
            },
        );
        state.next_id = order_id.next();

        Ok(order_id)
    }

    fn get(&self, order_id: OrderId) -> Result<Option<PersistedOrderRecord>, RepositoryError> {
        Ok(self.read()?.records.get(&order_id).cloned())
    }
}
