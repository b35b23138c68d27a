//! Auth subcommand implementations.

mod login;
mod logout;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::session::ClientOptions;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in and store the session token
    Login(login::LoginArgs),

    /// Clear the stored session
    Logout(logout::LogoutArgs),

    /// Display the active session
    Whoami(whoami::WhoamiArgs),
}

pub async fn handle(cmd: AuthCommand, options: &ClientOptions) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login::run(args, options).await,
        AuthSubcommand::Logout(args) => logout::run(args, options).await,
        AuthSubcommand::Whoami(args) => whoami::run(args, options).await,
    }
}
