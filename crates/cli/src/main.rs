//! RocketShoes cart command line

use std::{io, iter, process::ExitCode, sync::Arc};

use tracing::{debug, error};

use rocketshoes_app::{context::AppContext, domain::notifications::ChannelNotifier};

use crate::config::CliConfig;

mod commands;
mod config;
mod observability;

/// RocketShoes cart CLI entry point
#[tokio::main]
pub async fn main() -> ExitCode {
    // Load configuration from .env and CLI arguments
    let config = match CliConfig::load() {
        Ok(config) => config,
        Err(error) => error.exit(),
    };

    if let Err(error) = observability::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for setup errors"
        )]
        {
            eprintln!("Observability error: {error}");
        }

        return ExitCode::FAILURE;
    }

    let (notifier, mut notices) = ChannelNotifier::channel();

    let app = match AppContext::from_config(
        config.catalog.catalog_config(),
        &config.storage.path,
        Arc::new(notifier),
    ) {
        Ok(app) => app,
        Err(source) => {
            error!("failed to initialise app context: {source}");

            return ExitCode::FAILURE;
        }
    };

    debug!(
        storage = %config.storage.path.display(),
        command = ?config.command,
        "running cart command"
    );

    let outcome = commands::run(app.carts.as_ref(), config.command).await;

    let reported = commands::report(
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
        &outcome,
        iter::from_fn(|| notices.try_recv().ok()),
    );

    match reported {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(source) => {
            error!("failed to write command output: {source}");

            ExitCode::FAILURE
        }
    }
}
