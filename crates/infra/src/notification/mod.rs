//! Customer notification boundary.

pub mod logging;
pub mod r#trait;

pub use logging::LogNotifier;
pub use r#trait::{NotificationDispatcher, NotificationError};
