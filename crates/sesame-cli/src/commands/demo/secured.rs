//! Secured action command implementation.

use anyhow::{Context, Result};
use clap::Args;

use sesame_core::AuthResult;

use crate::output;
use crate::session::ClientOptions;

#[derive(Args, Debug)]
pub struct SecuredArgs {
    /// Label echoed back by the action
    #[arg(long, default_value = "demo")]
    pub action_type: String,
}

pub async fn run(args: SecuredArgs, options: &ClientOptions) -> Result<()> {
    let mut manager = options.open().await.context("Failed to open session store")?;

    let result: AuthResult<_> = manager.secured_action(&args.action_type).await.into();

    output::report(result, options.json, "Secured action refused", |action| {
        output::success(&action.message);
        output::field("User", &action.user_id);
        output::field("Action", &action.action_type);
        output::field("At", &action.timestamp.to_rfc3339());
    })
}
