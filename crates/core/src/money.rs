//! Exact monetary arithmetic helpers.
//!
//! Amounts are plain [`Decimal`]s. They carry no currency; the pipeline never
//! rounds them.

use rust_decimal::Decimal;

use crate::error::{DomainError, DomainResult};

/// The zero amount.
pub const ZERO: Decimal = Decimal::ZERO;

/// `amount × rate`, where `rate` is a fraction (e.g. `0.10` for 10 %).
pub fn percent_of(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate
}

/// `a + b`, or an overflow error naming `what`.
pub fn checked_add(a: Decimal, b: Decimal, what: &str) -> DomainResult<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| DomainError::overflow(what.to_string()))
}

/// `a - b`, or an overflow error naming `what`.
pub fn checked_sub(a: Decimal, b: Decimal, what: &str) -> DomainResult<Decimal> {
    a.checked_sub(b)
        .ok_or_else(|| DomainError::overflow(what.to_string()))
}

pub fn is_non_negative(amount: Decimal) -> bool {
    !amount.is_sign_negative() || amount.is_zero()
}

/// Whether `rate` is a valid fraction in `[0, 1]`.
pub fn is_fraction(rate: Decimal) -> bool {
    is_non_negative(rate) && rate <= Decimal::ONE
}
