//! Service configuration.

use std::time::Duration;

use crate::codec::DEFAULT_TOKEN_TTL_SECS;
use crate::resilient::{DEFAULT_FAILURE_RATE, RetryPolicy};

/// Tunables for [`AuthService`](crate::AuthService).
///
/// The latencies simulate backend round trips; [`ServiceConfig::instant`]
/// zeroes them for tests and scripted use.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Lifetime of issued tokens.
    pub token_ttl: chrono::Duration,
    /// Delay before a successful login issues its token.
    pub login_latency: Duration,
    /// Delay before a secured action returns.
    pub action_latency: Duration,
    /// Delay before the public greeting returns.
    pub greeting_latency: Duration,
    /// Delay of each call of the resilient demo operation.
    pub resilient_latency: Duration,
    /// Retry policy for the resilient demo action.
    pub retry: RetryPolicy,
    /// Per-call failure probability of the resilient demo operation.
    pub failure_rate: f64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            token_ttl: chrono::Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
            login_latency: Duration::from_millis(500),
            action_latency: Duration::from_millis(300),
            greeting_latency: Duration::from_millis(200),
            resilient_latency: Duration::from_millis(100),
            retry: RetryPolicy::default(),
            failure_rate: DEFAULT_FAILURE_RATE,
        }
    }
}

impl ServiceConfig {
    /// Defaults with every simulated latency set to zero.
    pub fn instant() -> Self {
        Self {
            login_latency: Duration::ZERO,
            action_latency: Duration::ZERO,
            greeting_latency: Duration::ZERO,
            resilient_latency: Duration::ZERO,
            ..Self::default()
        }
    }
}
