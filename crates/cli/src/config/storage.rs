//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Cart persistence settings.
#[derive(Debug, Args)]
pub struct StorageArgs {
    /// File the cart is persisted to between runs
    #[arg(
        long = "storage-path",
        env = "CART_STORAGE_PATH",
        default_value = "rocketshoes-storage.json"
    )]
    pub path: PathBuf,
}
