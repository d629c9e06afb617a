//! Cart Models

use std::{num::NonZeroU32, slice::Iter};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::products::models::{Product, ProductId};

/// A product in the cart together with how many units were requested.
///
/// Serialised flat, the product attributes followed by `amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product as fetched from the catalog.
    #[serde(flatten)]
    pub product: Product,

    /// Units requested, at least one.
    pub amount: NonZeroU32,
}

impl LineItem {
    /// A fresh line item holding a single unit.
    #[must_use]
    pub fn new(product: Product) -> Self {
        Self {
            product,
            amount: NonZeroU32::MIN,
        }
    }

    /// Id of the product on this line.
    #[must_use]
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Price of the whole line, unit price times amount.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.amount.get())
    }
}

/// Ordered cart contents, unique by product id.
///
/// Every mutation returns a new `Cart` and leaves `self` untouched, so a
/// snapshot handed to a reader never changes underneath it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from line items, keeping the first entry for any product id
    /// that appears more than once.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();

        for item in items {
            if cart.get(item.id()).is_none() {
                cart.items.push(item);
            }
        }

        cart
    }

    /// Get the number of line items in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate line items in cart order.
    pub fn iter(&self) -> Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Line items in cart order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Line item for `product`, if present.
    pub fn get(&self, product: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == product)
    }

    /// Index of the line item for `product`, if present.
    pub fn position(&self, product: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == product)
    }

    /// Total number of units across all line items.
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.amount.get()))
            .sum()
    }

    /// Sum of all line subtotals.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// A copy of this cart with `product` set to `amount`, at the same position.
    ///
    /// Returns `None` when the product is not in the cart.
    #[must_use]
    pub fn with_amount(&self, product: ProductId, amount: NonZeroU32) -> Option<Self> {
        let position = self.position(product)?;

        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                if index == position {
                    LineItem {
                        product: item.product.clone(),
                        amount,
                    }
                } else {
                    item.clone()
                }
            })
            .collect();

        Some(Self { items })
    }

    /// A copy of this cart with a single unit of `product` appended at the end.
    ///
    /// Returns `None` when the product is already in the cart.
    #[must_use]
    pub fn with_appended(&self, product: Product) -> Option<Self> {
        if self.get(product.id).is_some() {
            return None;
        }

        let mut items = Vec::with_capacity(self.items.len() + 1);

        items.extend(self.items.iter().cloned());
        items.push(LineItem::new(product));

        Some(Self { items })
    }

    /// A copy of this cart without `product`.
    ///
    /// Returns `None` when the product is not in the cart.
    #[must_use]
    pub fn without(&self, product: ProductId) -> Option<Self> {
        self.position(product)?;

        let items = self
            .items
            .iter()
            .filter(|item| item.id() != product)
            .cloned()
            .collect();

        Some(Self { items })
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Request to set a line item's quantity to an explicit value.
///
/// `amount` is signed so that a UI decrementing past one can pass it straight
/// through; anything below one is ignored by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    /// Product whose line item is changed.
    pub product_id: ProductId,

    /// Requested amount.
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::{Map, json};
    use testresult::TestResult;

    use super::*;

    fn product(id: u64, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price,
            image: format!("https://example.com/{id}.jpg"),
            attributes: Map::new(),
        }
    }

    fn amount(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
    }

    fn cart_of(ids: &[u64]) -> Cart {
        Cart::with_items(
            ids.iter()
                .map(|id| LineItem::new(product(*id, Decimal::ONE))),
        )
    }

    fn ids(cart: &Cart) -> Vec<u64> {
        cart.iter().map(|item| item.id().get()).collect()
    }

    #[test]
    fn with_items_drops_duplicate_ids() {
        let cart = cart_of(&[1, 2, 1, 3]);

        assert_eq!(ids(&cart), vec![1, 2, 3]);
    }

    #[test]
    fn with_amount_keeps_position_and_leaves_original_untouched() -> TestResult {
        let cart = cart_of(&[1, 2, 3]);

        let updated = cart
            .with_amount(ProductId::new(2), amount(4))
            .ok_or("product 2 should be in the cart")?;

        assert_eq!(ids(&updated), vec![1, 2, 3]);
        assert_eq!(updated.position(ProductId::new(2)), Some(1));
        assert_eq!(
            updated.get(ProductId::new(2)).map(|item| item.amount.get()),
            Some(4)
        );
        assert_eq!(
            cart.get(ProductId::new(2)).map(|item| item.amount.get()),
            Some(1)
        );

        Ok(())
    }

    #[test]
    fn with_amount_on_missing_product_is_none() {
        let cart = cart_of(&[1]);

        assert!(cart.with_amount(ProductId::new(9), amount(2)).is_none());
    }

    #[test]
    fn with_appended_adds_single_unit_at_end() -> TestResult {
        let cart = cart_of(&[1, 2]);

        let updated = cart
            .with_appended(product(7, Decimal::ONE))
            .ok_or("product 7 should be appended")?;

        assert_eq!(ids(&updated), vec![1, 2, 7]);
        assert_eq!(
            updated.get(ProductId::new(7)).map(|item| item.amount.get()),
            Some(1)
        );
        assert_eq!(cart.len(), 2);

        Ok(())
    }

    #[test]
    fn with_appended_refuses_existing_product() {
        let cart = cart_of(&[1]);

        assert!(cart.with_appended(product(1, Decimal::ONE)).is_none());
    }

    #[test]
    fn without_missing_product_is_none() {
        assert!(cart_of(&[1, 2]).without(ProductId::new(3)).is_none());
    }

    #[test]
    fn totals_account_for_amounts() -> TestResult {
        let cart = Cart::with_items([
            LineItem::new(product(1, Decimal::new(17_990, 2))),
            LineItem::new(product(2, Decimal::new(13_990, 2))),
        ])
        .with_amount(ProductId::new(2), amount(3))
        .ok_or("product 2 should be in the cart")?;

        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.total(), Decimal::new(59_960, 2));
        assert_eq!(
            cart.get(ProductId::new(2)).map(LineItem::subtotal),
            Some(Decimal::new(41_970, 2))
        );

        Ok(())
    }

    #[test]
    fn serialises_as_flat_array() -> TestResult {
        let cart = Cart::with_items([LineItem::new(product(42, Decimal::new(1999, 1)))]);

        let value = serde_json::to_value(&cart)?;

        assert_eq!(
            value,
            json!([{
                "id": 42,
                "title": "Product 42",
                "price": 199.9,
                "image": "https://example.com/42.jpg",
                "amount": 1,
            }])
        );

        Ok(())
    }

    #[test]
    fn zero_amount_is_rejected_when_decoding() {
        let result = serde_json::from_value::<Cart>(json!([{
            "id": 1,
            "title": "Product 1",
            "price": 10,
            "image": "1.jpg",
            "amount": 0,
        }]));

        assert!(result.is_err(), "amount 0 must not decode into a line item");
    }

    proptest! {
        #[test]
        fn removal_keeps_relative_order(
            ids in prop::collection::btree_set(1u64..500, 1..20),
            pick in any::<prop::sample::Index>(),
        ) {
            let ids: Vec<u64> = ids.into_iter().collect();
            let removed = ids[pick.index(ids.len())];
            let cart = cart_of(&ids);

            let updated = cart.without(ProductId::new(removed));

            let expected: Vec<u64> = ids.iter().copied().filter(|id| *id != removed).collect();

            prop_assert_eq!(updated.map(|cart| self::ids(&cart)), Some(expected));
        }

        #[test]
        fn amount_update_touches_only_its_line(
            ids in prop::collection::btree_set(1u64..500, 1..20),
            pick in any::<prop::sample::Index>(),
            new_amount in 1u32..1_000,
        ) {
            let ids: Vec<u64> = ids.into_iter().collect();
            let target = ids[pick.index(ids.len())];
            let cart = cart_of(&ids);

            let updated = cart.with_amount(ProductId::new(target), amount(new_amount));

            prop_assert!(updated.is_some());

            for (before, after) in cart.iter().zip(updated.iter().flat_map(Cart::iter)) {
                prop_assert_eq!(before.id(), after.id());

                if before.id().get() == target {
                    prop_assert_eq!(after.amount.get(), new_amount);
                } else {
                    prop_assert_eq!(before, after);
                }
            }
        }
    }
}
