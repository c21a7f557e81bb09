//! # Global runtime configuration.
//!
//! [`SupervisorConfig`] centralizes the settings of the supervision runtime.
//! It is used in two ways:
//! 1. **Supervisor creation**: `Supervisor::new(config, subscribers)`
//! 2. **FeedSpec defaults**: `FeedSpec::with_defaults(feed, &config)`

use std::time::Duration;

use crate::policies::{CooldownPolicy, RestartPolicy};

/// Global configuration for the supervision runtime.
///
/// ## Field semantics
/// - `cooldown`: delay between failed attempts (default: fixed 5 s)
/// - `restart`: what to do after a successful run (default: retire)
/// - `grace`: maximum wait for the feed to unwind after a termination request
/// - `bus_capacity`: event bus ring-buffer size (min 1; clamped by the bus)
#[derive(Clone, Debug)]
pub struct SupervisorConfig {
    /// Cool-down policy applied between failed attempts.
    ///
    /// Used by `FeedSpec::with_defaults()`. Can be overridden per spec.
    pub cooldown: CooldownPolicy,

    /// Default restart policy.
    ///
    /// Used by `FeedSpec::with_defaults()`. Can be overridden per spec.
    pub restart: RestartPolicy,

    /// Maximum time to wait for the feed to stop after cancellation.
    ///
    /// When a termination request arrives:
    /// - the feed is cancelled via its `CancellationToken`
    /// - the supervisor waits up to `grace` for the worker to exit
    /// - if the grace lapses, the worker is aborted and
    ///   `RuntimeError::GraceExceeded` is returned
    pub grace: Duration,

    /// Capacity of the event bus broadcast ring buffer.
    ///
    /// Receivers that lag behind more than `bus_capacity` events observe
    /// `Lagged` and skip older items.
    pub bus_capacity: usize,
}

impl SupervisorConfig {
    /// Returns the bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for SupervisorConfig {
    /// Default configuration:
    ///
    /// - `cooldown = fixed 5 s`
    /// - `restart = RestartPolicy::OnFailure` (retire after first success)
    /// - `grace = 30 s`
    /// - `bus_capacity = 256`
    fn default() -> Self {
        Self {
            cooldown: CooldownPolicy::default(),
            restart: RestartPolicy::default(),
            grace: Duration::from_secs(30),
            bus_capacity: 256,
        }
    }
}
