//! Storefront cart state: stock-checked mutations over a persisted cart.

pub mod context;
pub mod domain;

#[cfg(test)]
mod test;
