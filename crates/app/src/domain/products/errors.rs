//! Products service errors.

use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::products::models::ProductId;

/// Errors raised while talking to the product catalog.
#[derive(Debug, Error)]
pub enum ProductsServiceError {
    /// The catalog has no such product.
    #[error("product {0} not found in catalog")]
    NotFound(ProductId),

    /// The catalog answered with a non-success status.
    #[error("catalog returned {status} for {url}")]
    UnexpectedStatus {
        /// Status returned.
        status: StatusCode,
        /// Requested URL.
        url: String,
    },

    /// Transport failure or undecodable body.
    #[error("catalog request failed")]
    Http(#[from] reqwest::Error),
}
