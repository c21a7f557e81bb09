//! # Restart policy for the supervised feed.
//!
//! [`RestartPolicy`] decides what the restart loop does once an attempt
//! finishes. Failures are always retried (after a cool-down); the policy
//! only governs what happens after a *successful* run:
//!
//! - [`RestartPolicy::OnFailure`] the feed is retired after its first
//!   successful run (default).
//! - [`RestartPolicy::KeepAlive`] the feed is started again after success,
//!   with an optional pause between runs.
//!
//! ## Choosing a policy
//!
//! **Ingest-once feeds** (catch up, then done):
//! ```text
//! RestartPolicy::OnFailure           → retried until it succeeds, then retired
//! ```
//!
//! **Long-lived feeds** (must stay up for the process lifetime):
//! ```text
//! RestartPolicy::KeepAlive {
//!     pause: None                    → restart immediately after success
//!     pause: Some(dur)               → wait dur between successful runs
//! }
//! ```

use std::time::Duration;

/// Policy controlling whether the feed is started again after a successful run.
#[derive(Clone, Copy, Debug)]
pub enum RestartPolicy {
    /// Retry failures; retire the feed after its first successful run
    /// (default).
    OnFailure,

    /// Keep the feed alive: restart after success as well.
    KeepAlive {
        /// Optional pause between successful runs.
        ///
        /// - `None` → restart immediately
        /// - `Some(dur)` → wait `dur` before the next run
        pause: Option<Duration>,
    },
}

impl RestartPolicy {
    /// Shorthand for [`RestartPolicy::KeepAlive`] without a pause.
    pub fn keep_alive() -> Self {
        RestartPolicy::KeepAlive { pause: None }
    }

    /// Shorthand for [`RestartPolicy::KeepAlive`] with a pause between
    /// successful runs.
    pub fn keep_alive_every(pause: Duration) -> Self {
        RestartPolicy::KeepAlive { pause: Some(pause) }
    }
}

impl Default for RestartPolicy {
    /// Returns [`RestartPolicy::OnFailure`].
    fn default() -> Self {
        RestartPolicy::OnFailure
    }
}
