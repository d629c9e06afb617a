//! Products service.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::products::{
    errors::ProductsServiceError,
    models::{Product, ProductId, Stock},
};

/// Configuration for connecting to the product catalog API.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Catalog base address, e.g. `"http://localhost:3333"`.
    pub base_url: String,

    /// Upper bound for a single catalog request.
    pub timeout: Duration,
}

/// Product catalog backed by the storefront HTTP API.
#[derive(Debug, Clone)]
pub struct HttpProductsService {
    config: CatalogConfig,
    http: Client,
}

impl HttpProductsService {
    /// Create a new catalog client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(config: CatalogConfig) -> Result<Self, ProductsServiceError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self::with_client(config, http))
    }

    /// Create a catalog client that reuses an already configured HTTP client.
    #[must_use]
    pub fn with_client(config: CatalogConfig, http: Client) -> Self {
        Self { config, http }
    }

    fn url(&self, resource: &str, product: ProductId) -> String {
        format!(
            "{}/{resource}/{product}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        resource: &str,
        product: ProductId,
    ) -> Result<T, ProductsServiceError> {
        let url = self.url(resource, product);

        debug!(%url, "fetching from catalog");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ProductsServiceError::NotFound(product));
        }

        if !status.is_success() {
            return Err(ProductsServiceError::UnexpectedStatus { status, url });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ProductsService for HttpProductsService {
    async fn get_stock(&self, product: ProductId) -> Result<Stock, ProductsServiceError> {
        self.fetch("stock", product).await
    }

    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError> {
        self.fetch("products", product).await
    }
}

/// Read access to the product catalog.
#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve the current stock level of a product.
    async fn get_stock(&self, product: ProductId) -> Result<Stock, ProductsServiceError>;

    /// Retrieve the full details of a product.
    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError>;
}
