//! Customer orders domain module.
//!
//! This crate contains the order model and its structural validation, implemented
//! purely as deterministic domain logic (no IO, no pricing, no storage).

pub mod order;

pub use order::{Order, OrderItem};
