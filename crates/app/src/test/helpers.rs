//! Test Helpers

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde_json::Map;
use testresult::TestResult;

use crate::domain::{
    carts::{
        CART_STORAGE_KEY,
        models::Cart,
    },
    notifications::MockNotifier,
    products::models::{Product, ProductId},
    storage::{InMemoryStorage, KeyValueStorage},
};

/// Catalog product with a predictable title, price and image for `id`.
pub(crate) fn product(id: u64) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        price: Decimal::from(id) + Decimal::new(99, 2),
        image: format!("https://example.com/products/{id}.jpg"),
        attributes: Map::new(),
    }
}

/// Notifier that fails the test if anything is reported.
pub(crate) fn strict_notifier() -> MockNotifier {
    let mut notifier = MockNotifier::new();

    notifier.expect_error().never();

    notifier
}

/// Storage already holding a persisted cart of `(id, amount)` line items.
pub(crate) fn seeded_storage(items: &[(u64, u32)]) -> TestResult<InMemoryStorage> {
    let mut cart = Cart::new();

    for &(id, amount) in items {
        cart = cart
            .with_appended(product(id))
            .ok_or("seed ids must be unique")?;

        if let Some(amount) = NonZeroU32::new(amount) {
            cart = cart
                .with_amount(ProductId::new(id), amount)
                .ok_or("seeded product should be present")?;
        }
    }

    let storage = InMemoryStorage::new();

    storage.set(
        CART_STORAGE_KEY,
        &serde_json::to_string(cart.items())?,
    )?;

    Ok(storage)
}

pub(crate) fn ids(cart: &Cart) -> Vec<u64> {
    cart.iter().map(|item| item.id().get()).collect()
}

pub(crate) fn amounts(cart: &Cart) -> Vec<u32> {
    cart.iter().map(|item| item.amount.get()).collect()
}
