//! Storage
//!
//! Durable key-value storage the cart is persisted into between sessions.

pub mod errors;
mod file;
pub mod service;

pub use errors::StorageError;
pub use file::FileStorage;
pub use service::*;
