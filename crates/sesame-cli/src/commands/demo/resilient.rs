//! Resilient action command implementation.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use sesame_core::resilient::RandomFailures;
use sesame_core::{AuthResult, RetryPolicy};

use crate::output;
use crate::session::ClientOptions;

#[derive(Args, Debug)]
pub struct ResilientArgs {
    /// Chance (0.0 to 1.0) that any single call fails
    #[arg(long, default_value_t = sesame_core::resilient::DEFAULT_FAILURE_RATE)]
    pub failure_rate: f64,

    /// Total calls allowed, including the first
    #[arg(long, default_value_t = sesame_core::resilient::DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// Deadline for the whole retry sequence, in milliseconds
    #[arg(long, default_value_t = 5000)]
    pub timeout_ms: u64,

    /// Seed the failure generator for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,
}

pub async fn run(args: ResilientArgs, options: &ClientOptions) -> Result<()> {
    let mut config = options.service_config();
    config.failure_rate = args.failure_rate;
    config.retry = RetryPolicy::new(args.max_attempts, Duration::from_millis(args.timeout_ms));

    let service = options.service(config);
    let mut injector = match args.seed {
        Some(seed) => RandomFailures::seeded(service.config().failure_rate, seed),
        None => service.random_failures(),
    };

    if !options.json {
        eprintln!(
            "{}",
            format!(
                "Running with {:.0}% failure rate, up to {} attempts...",
                injector.rate() * 100.0,
                args.max_attempts.max(1)
            )
            .dimmed()
        );
    }

    let result: AuthResult<_> = service.resilient_action(&mut injector).await.into();

    output::report(result, options.json, "Error after retries", |outcome| {
        output::success(&outcome.message);
        output::field("Attempts", &outcome.attempts.to_string());
    })
}
