//! Infrastructure layer: persistence and notification boundaries, the
//! fulfillment pipeline that composes them, and configuration.

pub mod config;
pub mod notification;
pub mod processor;
pub mod repository;

mod integration_tests;

pub use config::{ConfigError, FulfillmentConfig};
pub use notification::{LogNotifier, NotificationDispatcher, NotificationError};
pub use processor::{
    ErrorKind, FailureCause, OrderProcessor, PricingOutcome, ProcessError, ProcessingResult,
};
pub use repository::{
    InMemoryOrderRepository, OrderRepository, PersistedOrderRecord, RepositoryError,
};
