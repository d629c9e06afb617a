//! Notifications
//!
//! User-facing messages raised by the cart when an operation is rejected.

pub mod service;

pub use service::*;
