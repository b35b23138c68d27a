//! Bounded retry under an overall deadline.
//!
//! [`resilient`] retries a fallible async operation immediately, up to a fixed
//! number of attempts, with the whole sequence bounded by a single timeout.
//! Failure injection for the demo operation is a parameter ([`FailureInjector`])
//! so tests can pin exact sequences instead of relying on chance.

use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::RetryError;

/// Default number of attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default overall deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Chance that the demo operation fails on any single call.
pub const DEFAULT_FAILURE_RATE: f64 = 0.7;

/// How hard [`resilient`] tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total calls allowed, including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Deadline for the whole sequence.
    pub timeout: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, timeout: Duration) -> Self {
        Self {
            max_attempts,
            timeout,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT)
    }
}

/// Run `operation` until it succeeds, attempts run out, or the deadline passes.
///
/// Retries are immediate. Intermediate failures are logged at debug level and
/// otherwise swallowed; only the final outcome is returned.
///
/// # Errors
///
/// - [`RetryError::Exhausted`] after exactly `max_attempts` failed calls
/// - [`RetryError::TimedOut`] if `timeout` elapses first, even with attempts left
///
/// # Example
///
/// ```
/// use sesame_core::resilient::{RetryPolicy, resilient};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut calls = 0;
/// let result = resilient(&RetryPolicy::default(), || {
///     calls += 1;
///     let call = calls;
///     async move { if call < 2 { Err("not yet") } else { Ok(call) } }
/// })
/// .await;
/// assert_eq!(result, Ok(2));
/// # }
/// ```
pub async fn resilient<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, RetryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempts = 0u32;

    let run = async {
        let mut last_error = String::new();
        while attempts < max_attempts {
            attempts += 1;
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    debug!(attempt = attempts, max_attempts, error = %e, "Attempt failed");
                    last_error = e.to_string();
                }
            }
        }
        Err(last_error)
    };

    let outcome = tokio::time::timeout(policy.timeout, run).await;

    match outcome {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(last_error)) => {
            warn!(attempts, "Operation failed after retries");
            Err(RetryError::Exhausted {
                attempts,
                last_error,
            })
        }
        Err(_) => {
            let timeout_ms = u64::try_from(policy.timeout.as_millis()).unwrap_or(u64::MAX);
            warn!(attempts, timeout_ms, "Operation timed out");
            Err(RetryError::TimedOut {
                timeout_ms,
                attempts,
            })
        }
    }
}

/// Decides whether the next call of a demo operation should fail.
pub trait FailureInjector: Send {
    fn should_fail(&mut self) -> bool;
}

/// Fails each call independently with a fixed probability.
#[derive(Debug, Clone)]
pub struct RandomFailures {
    rate: f64,
    rng: StdRng,
}

impl RandomFailures {
    /// Seeded from OS entropy; outcomes differ between runs.
    pub fn new(rate: f64) -> Self {
        Self::with_rng(rate, StdRng::from_entropy())
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(rate: f64, seed: u64) -> Self {
        Self::with_rng(rate, StdRng::seed_from_u64(seed))
    }

    fn with_rng(rate: f64, rng: StdRng) -> Self {
        let rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
        Self { rate, rng }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Default for RandomFailures {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_RATE)
    }
}

impl FailureInjector for RandomFailures {
    fn should_fail(&mut self) -> bool {
        self.rng.gen_bool(self.rate)
    }
}

/// Replays a fixed list of decisions, then always succeeds.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFailures {
    decisions: VecDeque<bool>,
}

impl ScriptedFailures {
    pub fn new(decisions: impl IntoIterator<Item = bool>) -> Self {
        Self {
            decisions: decisions.into_iter().collect(),
        }
    }

    /// Fail the first `n` calls.
    pub fn failing_first(n: usize) -> Self {
        Self::new(std::iter::repeat_n(true, n))
    }
}

impl FailureInjector for ScriptedFailures {
    fn should_fail(&mut self) -> bool {
        self.decisions.pop_front().unwrap_or(false)
    }
}

/// Fails every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysFail;

impl FailureInjector for AlwaysFail {
    fn should_fail(&mut self) -> bool {
        true
    }
}

/// The error produced by an injected failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("simulated failure on attempt {attempt}")]
pub struct SimulatedFailure {
    pub attempt: u32,
}
