//! Discount strategies.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fulfillment_core::{money, DomainError, DomainResult};

/// Computes the discount granted on an order subtotal.
///
/// Implementations must be pure and must return a value in `[0, subtotal]`.
/// Callers rely on this and do not re-check it.
pub trait PricingStrategy: Send + Sync + core::fmt::Debug {
    fn calculate_discount(&self, subtotal: Decimal) -> Decimal;

    /// Short, stable label for logs.
    fn name(&self) -> &'static str;
}

impl<P> PricingStrategy for Box<P>
where
    P: PricingStrategy + ?Sized,
{
    fn calculate_discount(&self, subtotal: Decimal) -> Decimal {
        (**self).calculate_discount(subtotal)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<P> PricingStrategy for Arc<P>
where
    P: PricingStrategy + ?Sized,
{
    fn calculate_discount(&self, subtotal: Decimal) -> Decimal {
        (**self).calculate_discount(subtotal)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Never discounts.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoDiscount;

impl PricingStrategy for NoDiscount {
    fn calculate_discount(&self, _subtotal: Decimal) -> Decimal {
        money::ZERO
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Discounts `subtotal × rate` once the subtotal reaches `minimum`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdPercentageDiscount {
    minimum: Decimal,
    rate: Decimal,
}

impl ThresholdPercentageDiscount {
    /// `rate` is a fraction in `[0, 1]`; `minimum` must not be negative.
    pub fn new(minimum: Decimal, rate: Decimal) -> DomainResult<Self> {
        if !money::is_non_negative(minimum) {
            return Err(DomainError::validation(
                "discount minimum must not be negative",
            ));
        }
        if !money::is_fraction(rate) {
            return Err(DomainError::validation(
                "discount rate must be between 0 and 1",
            ));
        }
        Ok(Self { minimum, rate })
    }

    pub fn minimum(&self) -> Decimal {
        self.minimum
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }
}

impl PricingStrategy for ThresholdPercentageDiscount {
    fn calculate_discount(&self, subtotal: Decimal) -> Decimal {
        if subtotal >= self.minimum {
            money::percent_of(subtotal, self.rate)
        } else {
            money::ZERO
        }
    }

    fn name(&self) -> &'static str {
        "threshold_percentage"
    }
}

/// Bracketed discount: 20 % from 500, 10 % from 100, nothing below.
///
/// Lower bounds are inclusive; tiers are checked from the highest down.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieredDiscount;

impl TieredDiscount {
    /// `(lower bound, rate)` pairs, highest tier first.
    const TIERS: [(Decimal, Decimal); 2] = [
        (Decimal::from_parts(500, 0, 0, false, 0), Decimal::from_parts(20, 0, 0, false, 2)),
        (Decimal::from_parts(100, 0, 0, false, 0), Decimal::from_parts(10, 0, 0, false, 2)),
    ];
}

impl PricingStrategy for TieredDiscount {
    fn calculate_discount(&self, subtotal: Decimal) -> Decimal {
        Self::TIERS
            .iter()
            .find(|(lower, _)| subtotal >= *lower)
            .map(|(_, rate)| money::percent_of(subtotal, *rate))
            .unwrap_or(money::ZERO)
    }

    fn name(&self) -> &'static str {
        "tiered"
    }
}
