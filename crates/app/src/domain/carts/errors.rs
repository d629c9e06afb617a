//! Carts service errors.

use thiserror::Error;

use crate::domain::{
    products::{ProductsServiceError, models::ProductId},
    storage::StorageError,
};

/// Shown when the requested quantity is more than the catalog has in stock.
pub const OUT_OF_STOCK_MESSAGE: &str = "Requested quantity is out of stock";

/// Shown for any other failure while adding a product.
pub const ADD_PRODUCT_FAILED_MESSAGE: &str = "Failed to add product";

/// Shown for any failure while removing a product.
pub const REMOVE_PRODUCT_FAILED_MESSAGE: &str = "Failed to remove product";

/// Shown for any other failure while changing a product's amount.
pub const UPDATE_PRODUCT_AMOUNT_FAILED_MESSAGE: &str = "Failed to update product amount";

/// Errors raised by cart mutations.
#[derive(Debug, Error)]
pub enum CartsServiceError {
    /// The catalog holds fewer units than requested.
    #[error("requested {requested} of product {product_id}, only {available} in stock")]
    StockExceeded {
        product_id: ProductId,
        requested: u64,
        available: i64,
    },

    /// Stock or product data could not be fetched.
    #[error("failed to fetch product data")]
    ProductFetchFailed(#[from] ProductsServiceError),

    /// The product has no line item in the cart.
    #[error("product {0} is not in the cart")]
    ProductNotFound(ProductId),

    /// The cart was updated but could not be written to storage.
    #[error("failed to persist cart")]
    Storage(#[from] StorageError),
}

/// The cart mutation an error was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    /// `add_product`
    AddProduct,
    /// `remove_product`
    RemoveProduct,
    /// `update_product_amount`
    UpdateProductAmount,
}

impl CartOperation {
    fn failure_message(self) -> &'static str {
        match self {
            Self::AddProduct => ADD_PRODUCT_FAILED_MESSAGE,
            Self::RemoveProduct => REMOVE_PRODUCT_FAILED_MESSAGE,
            Self::UpdateProductAmount => UPDATE_PRODUCT_AMOUNT_FAILED_MESSAGE,
        }
    }
}

impl CartsServiceError {
    /// The fixed, user-facing message for this error raised during `operation`.
    #[must_use]
    pub fn user_message(&self, operation: CartOperation) -> &'static str {
        match self {
            Self::StockExceeded { .. } => OUT_OF_STOCK_MESSAGE,
            Self::ProductFetchFailed(_) | Self::ProductNotFound(_) | Self::Storage(_) => {
                operation.failure_message()
            }
        }
    }
}
