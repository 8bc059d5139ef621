//! Shipping cost strategies.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fulfillment_core::{money, DomainError, DomainResult};

/// Computes the shipping cost for an order subtotal.
///
/// Implementations must be pure and never return a negative cost.
pub trait ShippingStrategy: Send + Sync + core::fmt::Debug {
    fn calculate_shipping(&self, subtotal: Decimal) -> Decimal;

    /// Short, stable label for logs.
    fn name(&self) -> &'static str;
}

impl<S> ShippingStrategy for Box<S>
where
    S: ShippingStrategy + ?Sized,
{
    fn calculate_shipping(&self, subtotal: Decimal) -> Decimal {
        (**self).calculate_shipping(subtotal)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<S> ShippingStrategy for Arc<S>
where
    S: ShippingStrategy + ?Sized,
{
    fn calculate_shipping(&self, subtotal: Decimal) -> Decimal {
        (**self).calculate_shipping(subtotal)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Free shipping from `free_shipping_threshold` up; a flat `base_cost` below it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdFlatShipping {
    free_shipping_threshold: Decimal,
    base_cost: Decimal,
}

impl ThresholdFlatShipping {
    pub fn new(free_shipping_threshold: Decimal, base_cost: Decimal) -> DomainResult<Self> {
        if !money::is_non_negative(free_shipping_threshold) {
            return Err(DomainError::validation(
                "free shipping threshold must not be negative",
            ));
        }
        if !money::is_non_negative(base_cost) {
            return Err(DomainError::validation(
                "shipping base cost must not be negative",
            ));
        }
        Ok(Self {
            free_shipping_threshold,
            base_cost,
        })
    }

    pub fn free_shipping_threshold(&self) -> Decimal {
        self.free_shipping_threshold
    }

    pub fn base_cost(&self) -> Decimal {
        self.base_cost
    }
}

impl ShippingStrategy for ThresholdFlatShipping {
    fn calculate_shipping(&self, subtotal: Decimal) -> Decimal {
        if subtotal >= self.free_shipping_threshold {
            money::ZERO
        } else {
            self.base_cost
        }
    }

    fn name(&self) -> &'static str {
        "threshold_flat"
    }
}

/// The same cost regardless of subtotal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRateShipping {
    cost: Decimal,
}

impl FlatRateShipping {
    pub fn new(cost: Decimal) -> DomainResult<Self> {
        if !money::is_non_negative(cost) {
            return Err(DomainError::validation("shipping cost must not be negative"));
        }
        Ok(Self { cost })
    }
}

impl ShippingStrategy for FlatRateShipping {
    fn calculate_shipping(&self, _subtotal: Decimal) -> Decimal {
        self.cost
    }

    fn name(&self) -> &'static str {
        "flat_rate"
    }
}
