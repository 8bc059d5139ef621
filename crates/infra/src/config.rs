//! Environment-driven configuration for the fulfillment pipeline.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `FULFILLMENT_DISCOUNT` (`none`, `tiered`, `threshold`) | `tiered` |
//! | `FULFILLMENT_DISCOUNT_MINIMUM` | `500` |
//! | `FULFILLMENT_DISCOUNT_RATE` | `0.15` |
//! | `FULFILLMENT_FREE_SHIPPING_THRESHOLD` | `200` |
//! | `FULFILLMENT_SHIPPING_BASE_COST` | `10` |
//! | `FULFILLMENT_NOTIFIER_CHANNEL` | `console` |

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fulfillment_core::DomainError;
use fulfillment_pricing::{
    NoDiscount, PricingStrategy, ShippingStrategy, ThresholdFlatShipping,
    ThresholdPercentageDiscount, TieredDiscount,
};

use crate::notification::LogNotifier;

pub const DISCOUNT_VAR: &str = "FULFILLMENT_DISCOUNT";
pub const DISCOUNT_MINIMUM_VAR: &str = "FULFILLMENT_DISCOUNT_MINIMUM";
pub const DISCOUNT_RATE_VAR: &str = "FULFILLMENT_DISCOUNT_RATE";
pub const FREE_SHIPPING_THRESHOLD_VAR: &str = "FULFILLMENT_FREE_SHIPPING_THRESHOLD";
pub const SHIPPING_BASE_COST_VAR: &str = "FULFILLMENT_SHIPPING_BASE_COST";
pub const NOTIFIER_CHANNEL_VAR: &str = "FULFILLMENT_NOTIFIER_CHANNEL";

/// Configuration error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid pricing parameters: {0}")]
    Rules(#[from] DomainError),
}

/// Which discount rule to apply.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    None,
    Tiered,
    Threshold,
}

impl FromStr for DiscountKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "tiered" => Ok(Self::Tiered),
            "threshold" => Ok(Self::Threshold),
            other => Err(format!(
                "unknown discount '{other}' (expected none, tiered or threshold)"
            )),
        }
    }
}

/// Pricing rules and notifier selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentConfig {
    pub discount: DiscountKind,
    /// Only used by `DiscountKind::Threshold`.
    pub discount_minimum: Decimal,
    /// Only used by `DiscountKind::Threshold`.
    pub discount_rate: Decimal,
    pub free_shipping_threshold: Decimal,
    pub shipping_base_cost: Decimal,
    pub notifier_channel: String,
}

impl Default for FulfillmentConfig {
    fn default() -> Self {
        Self {
            discount: DiscountKind::Tiered,
            discount_minimum: Decimal::new(500, 0),
            discount_rate: Decimal::new(15, 2),
            free_shipping_threshold: Decimal::new(200, 0),
            shipping_base_cost: Decimal::new(10, 0),
            notifier_channel: "console".to_string(),
        }
    }
}

impl FulfillmentConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using `lookup` to resolve variables; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            discount: parse_or(&lookup, DISCOUNT_VAR, defaults.discount)?,
            discount_minimum: parse_or(&lookup, DISCOUNT_MINIMUM_VAR, defaults.discount_minimum)?,
            discount_rate: parse_or(&lookup, DISCOUNT_RATE_VAR, defaults.discount_rate)?,
            free_shipping_threshold: parse_or(
                &lookup,
                FREE_SHIPPING_THRESHOLD_VAR,
                defaults.free_shipping_threshold,
            )?,
            shipping_base_cost: parse_or(
                &lookup,
                SHIPPING_BASE_COST_VAR,
                defaults.shipping_base_cost,
            )?,
            notifier_channel: lookup(NOTIFIER_CHANNEL_VAR)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.notifier_channel),
        };

        // Surface bad rule parameters at load time rather than first use.
        config.pricing_strategy()?;
        config.shipping_strategy()?;

        Ok(config)
    }

    pub fn pricing_strategy(&self) -> Result<Box<dyn PricingStrategy>, ConfigError> {
        Ok(match self.discount {
            DiscountKind::None => Box::new(NoDiscount),
            DiscountKind::Tiered => Box::new(TieredDiscount),
            DiscountKind::Threshold => Box::new(ThresholdPercentageDiscount::new(
                self.discount_minimum,
                self.discount_rate,
            )?),
        })
    }

    pub fn shipping_strategy(&self) -> Result<Box<dyn ShippingStrategy>, ConfigError> {
        Ok(Box::new(ThresholdFlatShipping::new(
            self.free_shipping_threshold,
            self.shipping_base_cost,
        )?))
    }

    pub fn notifier(&self) -> LogNotifier {
        LogNotifier::new(self.notifier_channel.clone())
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: core::fmt::Display,
{
    match lookup(var) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                var,
                value: raw.clone(),
                reason: e.to_string(),
            })
        }
        _ => {
            tracing::debug!(var, "not set; using default");
            Ok(default)
        }
    }
}
