//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::auth::AuthCommand;
use crate::commands::sports::SportsCommand;

/// Command-line client for the GTXBET API.
#[derive(Parser, Debug)]
#[command(name = "gtx")]
#[command(author, version = env!("GTX_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub api: ApiOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the API lives and where tokens are kept.
#[derive(Args, Debug, Clone)]
pub struct ApiOptions {
    /// API base URL
    #[arg(long, env = "GTX_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Partner key sent with sports-data reads
    #[arg(long, env = "GTX_PARTNER_PACKAGE", global = true, hide_env_values = true)]
    pub partner_package: Option<String>,

    /// Token file (defaults to the platform data directory)
    #[arg(long, env = "GTX_TOKEN_FILE", global = true)]
    pub token_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "GTX_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub timeout_secs: u64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Account and session operations
    Auth(AuthCommand),

    /// Sports-data reads
    Sports(SportsCommand),
}
