//! App Context

use std::{path::PathBuf, sync::Arc};

use thiserror::Error;

use crate::domain::{
    carts::{CartStore, CartsService},
    notifications::Notifier,
    products::{CatalogConfig, HttpProductsService, ProductsService, ProductsServiceError},
    storage::{FileStorage, KeyValueStorage},
};

/// Errors raised while building the application context.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The catalog HTTP client could not be built.
    #[error("failed to build catalog client")]
    Catalog(#[source] ProductsServiceError),
}

/// Shared application services.
#[derive(Clone)]
pub struct AppContext {
    /// Cart store for this session.
    pub carts: Arc<dyn CartsService>,
}

impl AppContext {
    /// Build application context talking to the HTTP catalog and persisting the
    /// cart to a file.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog HTTP client cannot be built.
    pub fn from_config(
        catalog: CatalogConfig,
        storage_path: impl Into<PathBuf>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AppInitError> {
        let products = HttpProductsService::new(catalog).map_err(AppInitError::Catalog)?;

        Ok(Self::with_services(
            Arc::new(products),
            notifier,
            Arc::new(FileStorage::new(storage_path)),
        ))
    }

    /// Build application context from already constructed collaborators.
    #[must_use]
    pub fn with_services(
        products: Arc<dyn ProductsService>,
        notifier: Arc<dyn Notifier>,
        storage: Arc<dyn KeyValueStorage>,
    ) -> Self {
        Self {
            carts: Arc::new(CartStore::load(products, notifier, storage)),
        }
    }
}
