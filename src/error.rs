//! Error types used by the feedvisor runtime and the supervised feed.
//!
//! This module defines two error enums:
//!
//! - [`RuntimeError`] — errors raised by the supervision runtime itself.
//! - [`FeedError`] — outcomes reported by individual feed attempts.
//!
//! Both types provide `as_label` helpers producing short stable strings for
//! logging and metrics.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the supervision runtime.
///
/// These represent failures of the supervision machinery, not of the feed:
/// a feed failure is recovered locally by the restart loop and never shows
/// up here.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// OS termination signal handlers could not be installed.
    ///
    /// Raised by [`Supervisor::run`](crate::Supervisor::run) before the feed
    /// is started; a supervisor that cannot observe termination requests must
    /// not run at all.
    #[error("failed to register termination signal handlers: {0}")]
    Signal(#[from] std::io::Error),

    /// The feed did not unwind within the shutdown grace period and was
    /// force-terminated.
    #[error("shutdown grace {grace:?} exceeded; feed force-terminated")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use feedvisor::RuntimeError;
    ///
    /// let err = RuntimeError::GraceExceeded { grace: Duration::from_secs(5) };
    /// assert_eq!(err.as_label(), "runtime_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::Signal(_) => "runtime_signal_registration",
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }
}

/// # Outcomes reported by feed attempts.
///
/// The restart loop treats every [`FeedError::Failed`] identically: log the
/// reason, wait out the cool-down, try again. There is no transient/permanent
/// distinction. [`FeedError::Canceled`] is not a failure — it is how a feed
/// acknowledges a shutdown request, and it is never retried.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum FeedError {
    /// The feed attempt failed with a human-readable reason.
    #[error("feed failed: {reason}")]
    Failed {
        /// The underlying failure description.
        reason: String,
    },

    /// The feed observed cancellation and stopped cooperatively.
    #[error("feed cancelled")]
    Canceled,
}

impl FeedError {
    /// Convenience constructor for [`FeedError::Failed`].
    ///
    /// # Example
    /// ```
    /// use feedvisor::FeedError;
    ///
    /// let err = FeedError::failed("connection refused");
    /// assert_eq!(err.as_label(), "feed_failed");
    /// ```
    pub fn failed(reason: impl Into<String>) -> Self {
        FeedError::Failed {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            FeedError::Failed { .. } => "feed_failed",
            FeedError::Canceled => "feed_canceled",
        }
    }

    /// True if this outcome is a cooperative-cancellation acknowledgement
    /// rather than an actual failure.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, FeedError::Canceled)
    }
}
