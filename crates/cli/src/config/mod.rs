//! CLI configuration module

use clap::Parser;

use crate::{
    commands::Command,
    config::{catalog::CatalogArgs, logging::LoggingConfig, storage::StorageArgs},
};

pub(crate) mod catalog;
pub(crate) mod logging;
pub(crate) mod storage;

/// RocketShoes cart command line
#[derive(Debug, Parser)]
#[command(name = "rocketshoes", about = "RocketShoes shopping cart", long_about = None)]
pub struct CliConfig {
    /// Product catalog settings.
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Cart persistence settings.
    #[command(flatten)]
    pub storage: StorageArgs,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Cart operation to run.
    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
