//! Demo action subcommand implementations.

mod greeting;
mod resilient;
mod secured;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::session::ClientOptions;

#[derive(Args, Debug)]
pub struct DemoCommand {
    #[command(subcommand)]
    pub command: DemoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DemoSubcommand {
    /// Run an action that requires a valid session
    Secured(secured::SecuredArgs),

    /// Fetch the public greeting (no login needed)
    Greeting(greeting::GreetingArgs),

    /// Run the flaky operation under retry and timeout
    Resilient(resilient::ResilientArgs),
}

pub async fn handle(cmd: DemoCommand, options: &ClientOptions) -> Result<()> {
    match cmd.command {
        DemoSubcommand::Secured(args) => secured::run(args, options).await,
        DemoSubcommand::Greeting(args) => greeting::run(args, options).await,
        DemoSubcommand::Resilient(args) => resilient::run(args, options).await,
    }
}
