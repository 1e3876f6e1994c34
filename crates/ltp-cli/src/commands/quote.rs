use ltp_core::{LtpResponse, QuoteService, QuoteServiceConfig};
use serde_json::Value;
use tracing::debug;

use crate::cli::QuoteArgs;
use crate::error::CliError;

pub async fn run(args: &QuoteArgs, config: &QuoteServiceConfig) -> Result<Value, CliError> {
    debug!(base_url = %config.base_url, pairs = %args.pairs, "running quote command");

    let service = QuoteService::from_config(config);
    let quotes = service.get_quotes(&args.pairs).await?;

    Ok(serde_json::to_value(LtpResponse::from(quotes))?)
}
