//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::auth::AuthCommand;
use crate::commands::demo::DemoCommand;

/// Demo login, session and retry CLI.
#[derive(Parser, Debug)]
#[command(name = "sesame")]
#[command(author, version = env!("SESAME_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Print results as {success, data | error, code} JSON records
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the stored session (defaults to the user data dir)
    #[arg(long, global = true, env = "SESAME_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Skip the simulated backend latency
    #[arg(long, global = true, env = "SESAME_NO_LATENCY")]
    pub no_latency: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Login, logout and session inspection
    Auth(AuthCommand),

    /// Secured, public and resilient demo actions
    Demo(DemoCommand),
}
