//! # Change Notification
//!
//! A `Signal` holds one value and tells its subscribers every time the value
//! is replaced or mutated.
//!
//! ```text
//!   set / update ──> [ RwLock<T> ] ──(lock released)──> listener(&T) ...
//! ```
//!
//! Delivery is synchronous: by the time `set` returns, every listener that
//! was subscribed when it was called has run.

mod signal;

pub use signal::{Signal, SubscriptionId};
