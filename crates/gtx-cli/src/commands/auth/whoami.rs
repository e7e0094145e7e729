//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the profile as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WhoamiArgs, api: &ApiOptions) -> Result<()> {
    let session = session::open(api)?;
    session.bootstrap().await;

    let user = session
        .user()
        .context("No active session. Run 'gtx auth login' first.")?;

    if args.json {
        output::json_pretty(&user)?;
    } else {
        output::user(&user);
    }

    Ok(())
}
