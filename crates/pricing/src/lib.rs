//! Pricing and shipping rules.
//!
//! Both are strategies: small, side-effect-free units selected and injected at
//! construction time. The fulfillment pipeline calls them through the
//! [`PricingStrategy`] and [`ShippingStrategy`] traits and never inspects which
//! variant it holds.

pub mod discount;
pub mod shipping;

pub use discount::{NoDiscount, PricingStrategy, ThresholdPercentageDiscount, TieredDiscount};
pub use shipping::{FlatRateShipping, ShippingStrategy, ThresholdFlatShipping};
