//! CLI argument definitions for `ltp`.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quote` | Fetch last traded prices for pairs |
//! | `pairs` | List the supported pairs |
//! | `health` | Report liveness |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--upstream-url` | `$LTP_UPSTREAM_URL` or Kraken | Provider API root |
//! | `--timeout-ms` | `$LTP_TIMEOUT_MS` or `10000` | Upstream request timeout |
//! | `--freshness-secs` | `$LTP_FRESHNESS_SECS` or `60` | Cache freshness window |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--log-json` | `false` | Emit logs as JSON on stderr |
//!
//! # Examples
//!
//! ```bash
//! ltp quote BTC/USD,BTC/EUR
//! ltp quote --pretty
//! RUST_LOG=ltp_core=debug ltp quote btc/chf
//! ```

use clap::{Args, Parser, Subcommand};

/// Last traded price quotes for BTC/USD, BTC/CHF and BTC/EUR.
#[derive(Debug, Parser)]
#[command(name = "ltp", author, version, about = "Last traded price quotes for BTC pairs")]
pub struct Cli {
    /// Provider API root, e.g. https://api.kraken.com/0/public.
    #[arg(long, global = true)]
    pub upstream_url: Option<String>,

    /// Upstream request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Maximum age in seconds at which a cached quote is still served.
    #[arg(long, global = true)]
    pub freshness_secs: Option<u64>,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true, default_value_t = false)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch last traded prices.
    Quote(QuoteArgs),
    /// List the supported pairs.
    Pairs,
    /// Report liveness.
    Health,
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Comma-separated pairs, e.g. "BTC/USD,BTC/EUR". Omit for all pairs.
    #[arg(default_value = "")]
    pub pairs: String,
}
