//! sesame - CLI for the sesame login, session and retry demos.
//!
//! Each invocation rehydrates the client session from the data directory,
//! runs one command, and persists whatever token state results.

mod cli;
mod commands;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{auth, demo};
use session::ClientOptions;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let options = ClientOptions {
        data_dir: cli.data_dir,
        no_latency: cli.no_latency,
        json: cli.json,
    };

    match cli.command {
        Commands::Auth(cmd) => auth::handle(cmd, &options).await,
        Commands::Demo(cmd) => demo::handle(cmd, &options).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so stdout stays parseable with --json.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
