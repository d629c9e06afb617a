//! Carts service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    num::NonZeroU32,
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use tokio::sync::{Mutex, watch};
use tracing::{debug, error, instrument, warn};

use crate::domain::{
    carts::{
        errors::{CartOperation, CartsServiceError},
        models::{Cart, LineItem, UpdateProductAmount},
    },
    notifications::Notifier,
    products::{
        ProductsService,
        models::{Product, ProductId},
    },
    storage::{KeyValueStorage, StorageError},
};

/// Storage key the serialised cart lives under.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Cart state for one storefront session.
///
/// Mutations are serialised: each one holds the store for its whole duration,
/// catalog round trips included, so concurrent calls cannot overwrite each
/// other's result. Reads never wait on a mutation.
pub struct CartStore {
    products: Arc<dyn ProductsService>,
    notifier: Arc<dyn Notifier>,
    storage: Arc<dyn KeyValueStorage>,
    state: watch::Sender<Arc<Cart>>,
    mutations: Mutex<()>,
}

impl CartStore {
    /// Create a store, restoring whatever cart was persisted under
    /// [`CART_STORAGE_KEY`]. Missing or unreadable data yields an empty cart.
    pub fn load(
        products: Arc<dyn ProductsService>,
        notifier: Arc<dyn Notifier>,
        storage: Arc<dyn KeyValueStorage>,
    ) -> Self {
        let cart = restore(storage.as_ref());

        debug!(items = cart.len(), "cart restored");

        let (state, _) = watch::channel(Arc::new(cart));

        Self {
            products,
            notifier,
            storage,
            state,
            mutations: Mutex::new(()),
        }
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<Arc<Cart>, CartsServiceError> {
        let cart = self.current();
        let current = cart.get(product_id).map_or(0, |item| item.amount.get());

        let stock = self.products.get_stock(product_id).await?;
        let requested = NonZeroU32::MIN.saturating_add(current);

        if i64::from(requested.get()) > stock.amount {
            return Err(CartsServiceError::StockExceeded {
                product_id,
                requested: requested.get().into(),
                available: stock.amount,
            });
        }

        let updated = if current > 0 {
            cart.with_amount(product_id, requested)
        } else {
            let product = self.products.get_product(product_id).await?;

            cart.with_appended(Product {
                id: product_id,
                ..product
            })
        };

        let updated = updated.ok_or(CartsServiceError::ProductNotFound(product_id))?;

        self.commit(updated)
    }

    fn try_remove_product(&self, product_id: ProductId) -> Result<Arc<Cart>, CartsServiceError> {
        let updated = self
            .current()
            .without(product_id)
            .ok_or(CartsServiceError::ProductNotFound(product_id))?;

        self.commit(updated)
    }

    async fn try_update_product_amount(
        &self,
        update: UpdateProductAmount,
    ) -> Result<Arc<Cart>, CartsServiceError> {
        let UpdateProductAmount { product_id, amount } = update;

        let stock = self.products.get_stock(product_id).await?;
        let requested = amount.unsigned_abs();

        let amount = u32::try_from(requested)
            .ok()
            .and_then(NonZeroU32::new)
            .filter(|amount| i64::from(amount.get()) <= stock.amount)
            .ok_or(CartsServiceError::StockExceeded {
                product_id,
                requested,
                available: stock.amount,
            })?;

        let updated = self
            .current()
            .with_amount(product_id, amount)
            .ok_or(CartsServiceError::ProductNotFound(product_id))?;

        self.commit(updated)
    }

    fn current(&self) -> Arc<Cart> {
        Arc::clone(&self.state.borrow())
    }

    /// Publish `cart` as the new state, then write it to storage.
    ///
    /// The published state is kept even if the write fails.
    fn commit(&self, cart: Cart) -> Result<Arc<Cart>, CartsServiceError> {
        let cart = Arc::new(cart);

        self.state.send_replace(Arc::clone(&cart));

        let raw = serde_json::to_string(cart.items()).map_err(StorageError::from)?;

        self.storage.set(CART_STORAGE_KEY, &raw)?;

        debug!(items = cart.len(), "cart persisted");

        Ok(cart)
    }

    fn report(&self, operation: CartOperation, failure: &CartsServiceError) {
        if let CartsServiceError::Storage(source) = failure {
            error!(?operation, "failed to persist cart: {source}");
        } else {
            warn!(?operation, "cart operation rejected: {failure}");
        }

        self.notifier.error(failure.user_message(operation));
    }
}

fn restore(storage: &dyn KeyValueStorage) -> Cart {
    let raw = match storage.get(CART_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(source) => {
            warn!("failed to read persisted cart: {source}");

            return Cart::new();
        }
    };

    match serde_json::from_str::<Vec<LineItem>>(&raw) {
        Ok(items) => Cart::with_items(items),
        Err(source) => {
            warn!("ignoring unreadable persisted cart: {source}");

            Cart::new()
        }
    }
}

impl Debug for CartStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartStore")
            .field("cart", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CartsService for CartStore {
    fn cart(&self) -> Arc<Cart> {
        self.current()
    }

    fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.state.subscribe()
    }

    #[instrument(skip(self))]
    async fn add_product(&self, product_id: ProductId) -> Result<Arc<Cart>, CartsServiceError> {
        let _mutation = self.mutations.lock().await;

        self.try_add_product(product_id)
            .await
            .inspect_err(|failure| self.report(CartOperation::AddProduct, failure))
    }

    #[instrument(skip(self))]
    async fn remove_product(&self, product_id: ProductId) -> Result<Arc<Cart>, CartsServiceError> {
        let _mutation = self.mutations.lock().await;

        self.try_remove_product(product_id)
            .inspect_err(|failure| self.report(CartOperation::RemoveProduct, failure))
    }

    #[instrument(skip(self))]
    async fn update_product_amount(
        &self,
        update: UpdateProductAmount,
    ) -> Result<Arc<Cart>, CartsServiceError> {
        if update.amount <= 0 {
            debug!("ignoring non-positive amount");

            return Ok(self.current());
        }

        let _mutation = self.mutations.lock().await;

        self.try_update_product_amount(update)
            .await
            .inspect_err(|failure| self.report(CartOperation::UpdateProductAmount, failure))
    }
}

/// Cart state shared with UI layers.
#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Snapshot of the current cart.
    fn cart(&self) -> Arc<Cart>;

    /// Receive every cart committed from now on.
    fn subscribe(&self) -> watch::Receiver<Arc<Cart>>;

    /// Add one unit of a product, appending it if it is not in the cart yet.
    async fn add_product(&self, product_id: ProductId) -> Result<Arc<Cart>, CartsServiceError>;

    /// Remove a product's line item entirely, whatever its amount.
    async fn remove_product(&self, product_id: ProductId) -> Result<Arc<Cart>, CartsServiceError>;

    /// Set a product's amount. Amounts below one leave the cart as it is.
    async fn update_product_amount(
        &self,
        update: UpdateProductAmount,
    ) -> Result<Arc<Cart>, CartsServiceError>;
}
