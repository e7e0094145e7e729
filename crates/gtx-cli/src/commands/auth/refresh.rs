//! Refresh command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RefreshArgs {}

pub async fn run(_args: RefreshArgs, api: &ApiOptions) -> Result<()> {
    let session = session::open(api)?;

    eprintln!("{}", "Refreshing session...".dimmed());

    session
        .api()
        .refresh_token()
        .await
        .context("Failed to refresh session")?;

    output::success("Session refreshed successfully");
    Ok(())
}
