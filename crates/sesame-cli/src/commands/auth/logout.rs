//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use sesame_core::AuthResult;

use crate::output;
use crate::session::ClientOptions;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, options: &ClientOptions) -> Result<()> {
    let mut manager = options.open().await.context("Failed to open session store")?;
    let was_authenticated = manager.state().is_authenticated();

    manager.logout().await;

    let result = AuthResult::success(serde_json::json!({ "loggedOut": was_authenticated }));
    output::report(result, options.json, "Logout failed", |_| {
        if was_authenticated {
            output::success("Logged out");
        } else {
            output::success("No active session; stored state cleared");
        }
    })
}
