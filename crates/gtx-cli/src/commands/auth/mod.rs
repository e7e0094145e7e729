//! Auth subcommand implementations.

mod login;
mod logout;
mod refresh;
mod register;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::ApiOptions;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Sign in with email and password
    Login(login::LoginArgs),

    /// Open a new account
    Register(register::RegisterArgs),

    /// End the session and erase stored tokens
    Logout(logout::LogoutArgs),

    /// Display the signed-in account
    Whoami(whoami::WhoamiArgs),

    /// Exchange the refresh token for a new access token
    Refresh(refresh::RefreshArgs),
}

pub async fn handle(cmd: AuthCommand, api: &ApiOptions) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login::run(args, api).await,
        AuthSubcommand::Register(args) => register::run(args, api).await,
        AuthSubcommand::Logout(args) => logout::run(args, api).await,
        AuthSubcommand::Whoami(args) => whoami::run(args, api).await,
        AuthSubcommand::Refresh(args) => refresh::run(args, api).await,
    }
}
