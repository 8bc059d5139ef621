//! Order persistence boundary.
//!
//! This module defines an infrastructure-facing abstraction for recording
//! processed orders without making any storage assumptions.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryOrderRepository;
pub use r#trait::{OrderRepository, PersistedOrderRecord, RepositoryError};
