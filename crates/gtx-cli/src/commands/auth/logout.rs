//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use gtx_core::LogoutOutcome;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, api: &ApiOptions) -> Result<()> {
    let session = session::open(api)?;

    if let LogoutOutcome::RemoteFailed { message } = session.logout().await {
        output::warning(&format!("Server did not confirm logout: {}", message));
    }

    output::success("Logged out");
    Ok(())
}
