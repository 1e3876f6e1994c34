mod catalog;
mod quote;

use std::time::Duration;

use ltp_core::QuoteServiceConfig;
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    match &cli.command {
        Command::Quote(args) => {
            let config = resolve_config(cli)?;
            quote::run(args, &config).await
        }
        Command::Pairs => catalog::pairs(),
        Command::Health => catalog::health(),
    }
}

/// Environment settings overridden by command-line flags.
fn resolve_config(cli: &Cli) -> Result<QuoteServiceConfig, CliError> {
    let mut config = QuoteServiceConfig::from_env()?;

    if let Some(url) = &cli.upstream_url {
        config.base_url = url.trim().to_owned();
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.request_timeout = Duration::from_millis(timeout_ms);
    }
    if let Some(freshness_secs) = cli.freshness_secs {
        config.freshness_window = Duration::from_secs(freshness_secs);
    }

    config.validate()?;
    Ok(config)
}
