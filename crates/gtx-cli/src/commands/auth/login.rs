//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use gtx_core::Credentials;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "GTX_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Keep the refresh token so the session survives an expired access token
    #[arg(long)]
    pub remember_me: bool,
}

pub async fn run(args: LoginArgs, api: &ApiOptions) -> Result<()> {
    let session = session::open(api)?;
    let credentials = Credentials::new(&args.email, &args.password).remember_me(args.remember_me);

    eprintln!("{}", "Logging in...".dimmed());

    let user = session
        .login(&credentials)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::user(&user);

    Ok(())
}
