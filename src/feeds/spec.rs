//! # Feed specification for supervised execution.
//!
//! [`FeedSpec`] bundles the feed with the policies that govern its
//! supervision: when to restart ([`RestartPolicy`]) and how long to pause
//! between failed attempts ([`CooldownPolicy`]).
//!
//! A spec can be created:
//! - **Explicitly** with [`FeedSpec::new`] (full control)
//! - **From config** with [`FeedSpec::with_defaults`] (inherit defaults)

use crate::{
    config::SupervisorConfig,
    feeds::feed::FeedRef,
    policies::{CooldownPolicy, RestartPolicy},
};

/// Specification for running a feed under supervision.
///
/// ## Example
/// ```rust
/// use tokio_util::sync::CancellationToken;
/// use feedvisor::{
///     CooldownPolicy, FeedError, FeedFn, FeedRef, FeedSpec, RestartPolicy, SupervisorConfig,
/// };
///
/// let feed: FeedRef = FeedFn::arc("demo", |_ctx: CancellationToken| async move {
///     Ok::<(), FeedError>(())
/// });
///
/// // Explicit configuration:
/// let spec = FeedSpec::new(feed.clone(), RestartPolicy::keep_alive(), CooldownPolicy::default());
///
/// // Inherit from global config (fixed 5s cool-down, retire on success):
/// let cfg = SupervisorConfig::default();
/// let spec2 = FeedSpec::with_defaults(feed, &cfg);
/// ```
#[derive(Clone)]
pub struct FeedSpec {
    feed: FeedRef,
    restart: RestartPolicy,
    cooldown: CooldownPolicy,
}

impl FeedSpec {
    /// Creates a new feed specification with explicit policies.
    pub fn new(feed: FeedRef, restart: RestartPolicy, cooldown: CooldownPolicy) -> Self {
        Self {
            feed,
            restart,
            cooldown,
        }
    }

    /// Creates a feed specification inheriting policies from global config.
    pub fn with_defaults(feed: FeedRef, cfg: &SupervisorConfig) -> Self {
        Self {
            feed,
            restart: cfg.restart,
            cooldown: cfg.cooldown,
        }
    }

    /// Returns a reference to the feed.
    pub fn feed(&self) -> &FeedRef {
        &self.feed
    }

    /// Convenience: returns the feed name.
    pub fn name(&self) -> &str {
        self.feed.name()
    }

    /// Returns the restart policy.
    pub fn restart(&self) -> RestartPolicy {
        self.restart
    }

    /// Returns the cool-down policy.
    pub fn cooldown(&self) -> CooldownPolicy {
        self.cooldown
    }

    /// Returns a new spec with an updated restart policy.
    pub fn with_restart(mut self, restart: RestartPolicy) -> Self {
        self.restart = restart;
        self
    }

    /// Returns a new spec with an updated cool-down policy.
    pub fn with_cooldown(mut self, cooldown: CooldownPolicy) -> Self {
        self.cooldown = cooldown;
        self
    }
}
