//! Order fulfillment pipeline (application-level orchestration).
//!
//! The `OrderProcessor` composes the order model, the pricing and shipping
//! strategies, the repository and the notifier into one linear pipeline:
//!
//! ```text
//! Order
//!   ↓
//! 1. Validate (structural invariants; failure stops here, nothing else runs)
//!   ↓
//! 2. Price (subtotal, discount, shipping, total)
//!   ↓
//! 3. Persist (repository assigns the order id)
//!   ↓
//! 4. Notify (only for orders that were recorded)
//!   ↓
//! ProcessingResult
//! ```
//!
//! Every step runs exactly once per call; nothing is retried here.
//!
//! ## Failure semantics
//!
//! - **Validation**: nothing was priced, recorded or sent. Fix the order and resubmit.
//! - **Storage**: the order was not recorded and no notification was attempted.
//!   Resubmitting is safe, though it will be assigned a new id.
//! - **Notification**: the order *was* recorded but the customer was not informed.
//!   Resubmitting would record it twice.
//!
//! - **Arithmetic**: an amount overflowed the decimal range while pricing. Nothing
//!   was recorded or sent.
//!
//! Storage, notification and arithmetic failures share `ErrorKind::UnexpectedError`;
//! the `cause` field tells them apart without implying a recovery policy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fulfillment_core::{money, DomainError, DomainResult, OrderId};
use fulfillment_orders::Order;
use fulfillment_pricing::{PricingStrategy, ShippingStrategy};

use crate::notification::{NotificationDispatcher, NotificationError};
use crate::repository::{OrderRepository, RepositoryError};

/// Amounts computed for one order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingOutcome {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub shipping: Decimal,
    /// `subtotal - discount + shipping`.
    pub total: Decimal,
}

/// Failure category reported to callers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The order itself was malformed.
    ValidationError,
    /// A collaborator (repository or notifier) failed, or pricing overflowed.
    UnexpectedError,
}

/// Which pipeline step failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCause {
    Validation,
    /// The order was not recorded.
    Storage,
    /// The order was recorded; the customer was not informed.
    Notification,
    /// Pricing overflowed; the order was not recorded.
    Arithmetic,
}

/// Outcome of [`OrderProcessor::process`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessingResult {
    Success {
        order_id: OrderId,
        subtotal: Decimal,
        discount: Decimal,
        shipping: Decimal,
        total: Decimal,
    },
    Failure {
        error_kind: ErrorKind,
        cause: FailureCause,
        message: String,
    },
}

impl ProcessingResult {
    fn success(order_id: OrderId, outcome: PricingOutcome) -> Self {
        Self::Success {
            order_id,
            subtotal: outcome.subtotal,
            discount: outcome.discount,
            shipping: outcome.shipping,
            total: outcome.total,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn order_id(&self) -> Option<OrderId> {
        match self {
            Self::Success { order_id, .. } => Some(*order_id),
            Self::Failure { .. } => None,
        }
    }
}

/// Pipeline step failure.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Order validation failed; carries the reason verbatim.
    #[error("{0}")]
    Validation(String),
    /// Persisting the order failed.
    #[error(transparent)]
    Storage(#[from] RepositoryError),
    /// Notifying the customer failed after the order was persisted.
    #[error(transparent)]
    Notification(#[from] NotificationError),
    /// An amount could not be represented while pricing the order.
    #[error("amount overflow: {0}")]
    Arithmetic(String),
}

impl From<DomainError> for ProcessError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Overflow(msg) => ProcessError::Arithmetic(msg),
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => {
                ProcessError::Validation(msg)
            }
        }
    }
}

impl From<ProcessError> for ProcessingResult {
    fn from(value: ProcessError) -> Self {
        let (error_kind, cause) = match &value {
            ProcessError::Validation(_) => (ErrorKind::ValidationError, FailureCause::Validation),
            ProcessError::Storage(_) => (ErrorKind::UnexpectedError, FailureCause::Storage),
            ProcessError::Notification(_) => {
                (ErrorKind::UnexpectedError, FailureCause::Notification)
            }
            ProcessError::Arithmetic(_) => (ErrorKind::UnexpectedError, FailureCause::Arithmetic),
        };
        let message = match error_kind {
            ErrorKind::ValidationError => value.to_string(),
            ErrorKind::UnexpectedError => format!("unexpected error: {value}"),
        };
        ProcessingResult::Failure {
            error_kind,
            cause,
            message,
        }
    }
}

/// Fulfillment pipeline over an injected repository and notifier.
///
/// Strategies and collaborators are fixed at construction. Holds no per-order
/// state, so one processor can serve concurrent callers as long as `R` and `N` can.
///
/// ## Generic Parameters
///
/// - `R`: repository implementation (e.g. `InMemoryOrderRepository`)
/// - `N`: notifier implementation (e.g. `LogNotifier`)
#[derive(Debug)]
pub struct OrderProcessor<R, N> {
    repository: R,
    notifier: N,
    pricing: Box<dyn PricingStrategy>,
    shipping: Box<dyn ShippingStrategy>,
}

impl<R, N> OrderProcessor<R, N> {
    pub fn new(
        repository: R,
        notifier: N,
        pricing: Box<dyn PricingStrategy>,
        shipping: Box<dyn ShippingStrategy>,
    ) -> Self {
        Self {
            repository,
            notifier,
            pricing,
            shipping,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Validate and price an order without recording it or notifying anyone.
    ///
    /// Amounts outside the decimal range fail with `DomainError::Overflow`.
    pub fn quote(&self, order: &Order) -> DomainResult<PricingOutcome> {
        order.validate()?;

        let subtotal = order.subtotal()?;
        let discount = self.pricing.calculate_discount(subtotal);
        let shipping = self.shipping.calculate_shipping(subtotal);
        let total = money::checked_add(
            money::checked_sub(subtotal, discount, "order total")?,
            shipping,
            "order total",
        )?;

        Ok(PricingOutcome {
            subtotal,
            discount,
            shipping,
            total,
        })
    }
}

impl<R, N> OrderProcessor<R, N>
where
    R: OrderRepository,
    N: NotificationDispatcher,
{
    /// Run an order through the pipeline. Never panics on collaborator failure;
    /// every failure is returned as `ProcessingResult::Failure`.
    pub fn process(&self, order: &Order) -> ProcessingResult {
        let span = tracing::info_span!("process_order", customer_id = order.customer_id());
        let _guard = span.enter();

        match self.run(order) {
            Ok((order_id, outcome)) => {
                tracing::info!(
                    order_id = order_id.get(),
                    total = %outcome.total,
                    "order processed"
                );
                ProcessingResult::success(order_id, outcome)
            }
            Err(err) => {
                match &err {
                    ProcessError::Validation(reason) => {
                        tracing::warn!(reason = %reason, "order rejected");
                    }
                    ProcessError::Storage(e) => {
                        tracing::error!(error = %e, "order not recorded");
                    }
                    ProcessError::Notification(e) => {
                        tracing::error!(error = %e, "order recorded but customer not notified");
                    }
                    ProcessError::Arithmetic(msg) => {
                        tracing::error!(error = %msg, "order could not be priced");
                    }
                }
                err.into()
            }
        }
    }

    fn run(&self, order: &Order) -> Result<(OrderId, PricingOutcome), ProcessError> {
        // 1-2) Validate, then price
        let outcome = self.quote(order)?;
        tracing::debug!(
            pricing = self.pricing.name(),
            shipping_rule = self.shipping.name(),
            subtotal = %outcome.subtotal,
            discount = %outcome.discount,
            shipping = %outcome.shipping,
            total = %outcome.total,
            "order priced"
        );

        // 3) Persist (must succeed before anyone is told about the order)
        let order_id = self.repository.save(order, outcome.total)?;

        // 4) Notify
        self.notifier
            .notify(order.customer_id(), order_id, outcome.total)?;

        Ok((order_id, outcome))
    }
}
