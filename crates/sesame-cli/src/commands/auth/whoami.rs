//! Whoami command implementation.

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::Args;

use sesame_core::{AuthResult, TokenError};

use crate::output;
use crate::session::ClientOptions;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs, options: &ClientOptions) -> Result<()> {
    let manager = options.open().await.context("Failed to open session store")?;

    let expires_at = manager
        .token()
        .and_then(|token| {
            manager
                .service()
                .validator()
                .codec()
                .decode(token.as_str())
                .ok()
        })
        .and_then(|payload| DateTime::from_timestamp(payload.expires_at, 0));

    let result: AuthResult<_> = manager
        .state()
        .session()
        .cloned()
        .ok_or(TokenError::Missing)
        .into();

    output::report(result, options.json, "Not logged in", |session| {
        output::field("User ID", session.user_id());
        output::field("Username", session.username());
        if let Some(expires_at) = expires_at {
            output::field("Expires", &expires_at.to_rfc3339());
        }
    })
}
