//! # CLI Interface
//!
//! Command-line arguments for `bookchain-node`, defined with `clap` derive.
//! Every `run` flag can also be supplied through a `BOOKCHAIN_*`
//! environment variable.

use clap::{Parser, Subcommand};

use bookchain_ledger::config::{DEFAULT_API_PORT, DEFAULT_BIND_ADDR, DEFAULT_METRICS_PORT};

/// Bookchain ledger node.
///
/// Serves the catalog and the block chain over HTTP and exposes
/// Prometheus metrics on a separate port. All state is in memory.
#[derive(Parser, Debug)]
#[command(
    name = "bookchain-node",
    about = "Bookchain ledger node",
    version,
    propagate_version = true
)]
pub struct BookchainCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the node.
    Run(RunArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Address both listeners bind to.
    #[arg(long, env = "BOOKCHAIN_BIND", default_value = DEFAULT_BIND_ADDR)]
    pub bind: String,

    /// Port for the HTTP API.
    #[arg(long, short = 'p', env = "BOOKCHAIN_PORT", default_value_t = DEFAULT_API_PORT)]
    pub port: u16,

    /// Port for the Prometheus metrics endpoint.
    #[arg(long, env = "BOOKCHAIN_METRICS_PORT", default_value_t = DEFAULT_METRICS_PORT)]
    pub metrics_port: u16,

    /// Log output format: `pretty` or `json`.
    #[arg(long, env = "BOOKCHAIN_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,
}
