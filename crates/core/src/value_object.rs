//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. An order line is a
/// value object; a persisted order record (which carries an assigned `OrderId`)
/// is an entity.
///
/// To "modify" a value object, build a new one. Because nothing mutates them after
/// construction they can be shared across threads freely, which is what lets the
/// fulfillment pipeline process independent orders concurrently.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct OrderItem { product_id: String, unit_price: Decimal, quantity: i64 }
///
/// impl ValueObject for OrderItem {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
