//! # Cool-down policy for retrying the feed.
//!
//! [`CooldownPolicy`] controls how long the restart loop pauses after a
//! failed attempt before starting the next one. It is parameterized by:
//! - [`CooldownPolicy::first`] the initial delay;
//! - [`CooldownPolicy::factor`] the multiplicative growth factor;
//! - [`CooldownPolicy::max`] the delay cap.
//!
//! The delay for attempt `n` is `first × factor^n`, clamped to `max`. The
//! base is derived purely from the attempt number, so delays never feed back
//! into later calculations.
//!
//! The default is a fixed 5 second cool-down ([`CooldownPolicy::fixed`] with
//! `factor = 1.0`); growing delays are an opt-in hardening knob.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use feedvisor::CooldownPolicy;
//!
//! let cooldown = CooldownPolicy {
//!     first: Duration::from_millis(500),
//!     factor: 2.0,
//!     max: Duration::from_secs(10),
//! };
//!
//! // Attempt 0 — uses `first`
//! assert_eq!(cooldown.next(0), Duration::from_millis(500));
//!
//! // Attempt 2 — first × factor^2 = 2s
//! assert_eq!(cooldown.next(2), Duration::from_secs(2));
//!
//! // Attempt 10 — 500ms × 2^10 = 512s → capped at max=10s
//! assert_eq!(cooldown.next(10), Duration::from_secs(10));
//! ```

use std::time::Duration;

/// Default cool-down between failed attempts.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(5);

/// Retry cool-down policy.
#[derive(Clone, Copy, Debug)]
pub struct CooldownPolicy {
    /// Delay before the first retry.
    pub first: Duration,
    /// Multiplicative growth factor (`1.0` = constant delay).
    pub factor: f64,
    /// Maximum delay cap.
    pub max: Duration,
}

impl CooldownPolicy {
    /// A constant cool-down of `delay` between every retry.
    pub fn fixed(delay: Duration) -> Self {
        Self {
            first: delay,
            factor: 1.0,
            max: delay,
        }
    }

    /// Computes the delay for the given attempt number (0-indexed).
    ///
    /// The base delay is `first × factor^attempt`, clamped to
    /// [`CooldownPolicy::max`]. Overflowing or non-finite intermediates clamp
    /// to `max` as well.
    pub fn next(&self, attempt: u32) -> Duration {
        let max_secs = self.max.as_secs_f64();
        let exp = attempt.min(i32::MAX as u32) as i32;
        let secs = self.first.as_secs_f64() * self.factor.powi(exp);

        if !secs.is_finite() || secs < 0.0 || secs > max_secs {
            self.max
        } else {
            Duration::from_secs_f64(secs)
        }
    }
}

impl Default for CooldownPolicy {
    /// Returns a constant 5 second cool-down ([`DEFAULT_COOLDOWN`]).
    fn default() -> Self {
        Self::fixed(DEFAULT_COOLDOWN)
    }
}
