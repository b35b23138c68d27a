//! Login command implementation.

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::Args;
use colored::Colorize;

use sesame_core::{AuthResult, Credentials};

use crate::output;
use crate::session::ClientOptions;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username (only "admin" is accepted)
    #[arg(long)]
    pub username: String,

    /// Any non-empty password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: LoginArgs, options: &ClientOptions) -> Result<()> {
    let mut manager = options.open().await.context("Failed to open session store")?;
    let credentials = Credentials::new(&args.username, &args.password);

    if !options.json {
        eprintln!("{}", "Logging in...".dimmed());
    }

    let result: AuthResult<_> = manager.login(&credentials).await.into();

    output::report(result, options.json, "Login failed", |session| {
        output::success("Logged in successfully");
        println!();
        output::field("User", session.user_id());
        let login_time = DateTime::from_timestamp_millis(session.login_time())
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        output::field("Login time", &login_time);
    })
}
