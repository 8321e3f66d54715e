//! Core configuration limits
//!
//! Validation constraints for pagination and the projection retry policy.
//! These limits enforce business rules and are independent of any concrete
//! storage backend.

use std::time::Duration;

/// Default page size for criteria queries.
pub const DEFAULT_PER_PAGE: u32 = 25;

/// Maximum allowed page size per request.
///
/// Prevents single requests from retrieving excessive data.
pub const MAX_PER_PAGE: u32 = 100;

/// Upper bound on a single projection retry delay.
const MAX_BACKOFF: Duration = Duration::from_secs(5);

/// Retry policy for projection dispatch.
///
/// Every projector failure is retried with exponential backoff; once the
/// attempts are exhausted the event/handler pair is dead-lettered.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts per handler, including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles per subsequent attempt.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Delay to wait after the given failed attempt (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(factor).min(MAX_BACKOFF)
    }

    /// Policy without sleeps, for tests.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(50),
        }
    }
}
