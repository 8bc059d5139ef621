use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fulfillment_core::{money, DomainError, DomainResult, ValueObject};

/// Order line: product, display name, unit price, quantity.
///
/// Immutable once constructed. `quantity` is signed so that malformed input can be
/// represented and rejected by [`Order::validate`] instead of at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    product_id: String,
    name: String,
    unit_price: Decimal,
    quantity: i64,
}

impl OrderItem {
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: i64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Line subtotal: unit price × quantity.
    ///
    /// Fails with `DomainError::Overflow` when the product is not representable.
    pub fn subtotal(&self) -> DomainResult<Decimal> {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| {
                DomainError::overflow(format!("line subtotal of item '{}'", self.product_id))
            })
    }
}

impl ValueObject for OrderItem {}

/// A customer's order: who placed it and the ordered line items.
///
/// Invariants are checked by [`Order::validate`], not by the constructor; the
/// fulfillment pipeline gates on validation before pricing anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    customer_id: String,
    items: Vec<OrderItem>,
}

impl Order {
    pub fn new(customer_id: impl Into<String>, items: Vec<OrderItem>) -> Self {
        Self {
            customer_id: customer_id.into(),
            items,
        }
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Sum of all line subtotals.
    ///
    /// Fails with `DomainError::Overflow` when a line or the running sum is not
    /// representable.
    pub fn subtotal(&self) -> DomainResult<Decimal> {
        self.items.iter().try_fold(money::ZERO, |acc, item| {
            money::checked_add(acc, item.subtotal()?, "order subtotal")
        })
    }

    /// Check structural invariants, reporting the first violation found.
    ///
    /// Order of checks: customer identifier, item presence, quantities, unit prices.
    pub fn validate(&self) -> DomainResult<()> {
        if self.customer_id.trim().is_empty() {
            return Err(DomainError::validation("customer identifier is required"));
        }

        if self.items.is_empty() {
            return Err(DomainError::validation(
                "order must contain at least one item",
            ));
        }

        if let Some(item) = self.items.iter().find(|i| i.quantity <= 0) {
            return Err(DomainError::validation(format!(
                "quantity must be positive (item '{}' has {})",
                item.product_id, item.quantity
            )));
        }

        if let Some(item) = self
            .items
            .iter()
            .find(|i| !money::is_non_negative(i.unit_price))
        {
            return Err(DomainError::validation(format!(
                "unit_price must not be negative (item '{}')",
                item.product_id
            )));
        }

        Ok(())
    }
}
