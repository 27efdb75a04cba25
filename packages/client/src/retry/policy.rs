//! Retry policy configuration with exponential backoff and jitter

use std::time::Duration;

use fastrand::Rng;

use crate::error::Error;

/// Retry policy configuration - all durations in milliseconds
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, the first send included
    pub max_attempts: u32,
    /// Initial delay in milliseconds before first retry
    pub initial_delay_ms: u64,
    /// Maximum delay in milliseconds between retries
    pub max_delay_ms: u64,
    /// Backoff multiplier (typically 2.0 for exponential backoff)
    pub backoff_multiplier: f64,
    /// Jitter factor (0.0 to 1.0) to prevent thundering herd
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    /// Balanced configuration suitable for most HTTP operations.
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 1000,
            max_delay_ms: 30000,
            backoff_multiplier: 2.0,
            jitter_factor: 0.1,
        }
    }
}

impl RetryPolicy {
    /// Create aggressive retry policy for critical operations
    ///
    /// Uses faster retry cycles with more attempts for operations
    /// that must succeed and can tolerate increased retry overhead.
    #[inline]
    #[must_use]
    pub fn aggressive() -> Self {
        Self {
            max_attempts: 5,
            initial_delay_ms: 100,
            max_delay_ms: 10000,
            backoff_multiplier: 1.5,
            jitter_factor: 0.2,
        }
    }

    /// Create conservative retry policy for non-critical operations
    ///
    /// Uses longer delays and fewer attempts to minimize resource
    /// consumption for operations that can tolerate failure.
    #[inline]
    #[must_use]
    pub fn conservative() -> Self {
        Self {
            max_attempts: 2,
            initial_delay_ms: 2000,
            max_delay_ms: 60000,
            backoff_multiplier: 3.0,
            jitter_factor: 0.05,
        }
    }

    /// Create no-retry policy (single attempt only)
    #[inline]
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_delay_ms: 0,
            max_delay_ms: 0,
            backoff_multiplier: 1.0,
            jitter_factor: 0.0,
        }
    }

    /// Policy retrying up to `max_attempts` times without waiting.
    #[must_use]
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::no_retry()
        }
    }

    /// `true` while another attempt is allowed after `retries` re-sends.
    #[inline]
    #[must_use]
    pub fn allows_retry(&self, retries: u32) -> bool {
        retries.saturating_add(1) < self.max_attempts
    }

    /// Calculate delay for specific attempt with exponential backoff and jitter
    ///
    /// Attempt `0` is the original send and never waits; attempt `n` waits
    /// `initial_delay * multiplier^(n-1)` capped at `max_delay`, plus or
    /// minus half the jitter range.
    #[inline]
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::from_millis(0);
        }

        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let base_delay = (self.initial_delay_ms as f64) * self.backoff_multiplier.powi(exponent);
        let capped_delay = base_delay.min(self.max_delay_ms as f64);

        // Add jitter to prevent thundering herd
        let jitter_range = capped_delay * self.jitter_factor;
        let mut rng = Rng::new();
        let jitter = rng.f64() * jitter_range - (jitter_range / 2.0);

        let final_delay = (capped_delay + jitter).max(0.0);
        Duration::from_millis(final_delay as u64)
    }

    /// Check if error is retryable based on error type and status codes
    ///
    /// Transport failures are retryable. Application errors are retryable
    /// when they carry a server error (5xx) or `429 Too Many Requests`.
    /// Configuration errors never are.
    #[inline]
    #[must_use]
    pub fn is_retryable_error(&self, error: &Error) -> bool {
        if error.is_transport() {
            return true;
        }

        if error.is_application() {
            return error
                .status()
                .is_some_and(|status| status.is_server_error() || status.as_u16() == 429);
        }

        false
    }

    /// Validate policy configuration for consistency
    ///
    /// # Errors
    ///
    /// Returns a message naming the first inconsistent parameter.
    #[inline]
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }

        if self.backoff_multiplier <= 0.0 {
            return Err("backoff_multiplier must be positive".to_string());
        }

        if self.jitter_factor < 0.0 || self.jitter_factor > 1.0 {
            return Err("jitter_factor must be between 0.0 and 1.0".to_string());
        }

        if self.initial_delay_ms > self.max_delay_ms {
            return Err("initial_delay_ms cannot exceed max_delay_ms".to_string());
        }

        Ok(())
    }
}
