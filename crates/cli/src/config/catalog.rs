//! Catalog Config

use std::time::Duration;

use clap::Args;
use rocketshoes_app::domain::products::CatalogConfig;

/// Product catalog API settings.
#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Base URL of the catalog API serving `/stock/{id}` and `/products/{id}`
    #[arg(long = "catalog-url", env = "CATALOG_URL", default_value = "http://localhost:3333")]
    pub url: String,

    /// Catalog request timeout in seconds
    #[arg(
        long = "catalog-timeout-seconds",
        env = "CATALOG_TIMEOUT_SECONDS",
        default_value_t = 10u64
    )]
    pub timeout_seconds: u64,
}

impl CatalogArgs {
    /// Catalog client settings for the app context.
    #[must_use]
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            base_url: self.url.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
        }
    }
}
