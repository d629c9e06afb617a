//! RocketShoes Domain Concerns

pub mod carts;
pub mod notifications;
pub mod products;
pub mod storage;
