//! # Runtime events emitted by the supervisor and the restart loop.
//!
//! [`EventKind`] classifies what happened; [`Event`] carries the metadata
//! (attempt number, cool-down delay, failure reason, timestamps).
//!
//! ## Ordering guarantees
//! Every event gets a globally unique sequence number (`seq`) that increases
//! monotonically. Subscribers can use `seq` to restore order if delivery is
//! ever observed out of order.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Feed lifecycle ===
    /// The restart loop is starting a feed attempt.
    ///
    /// Sets: `feed`, `attempt`.
    FeedStarting,

    /// The feed stopped gracefully (successful return or acknowledged
    /// cancellation).
    ///
    /// Sets: `feed`, `attempt`.
    FeedStopped,

    /// A feed attempt failed.
    ///
    /// Sets: `feed`, `attempt`, `reason`.
    FeedFailed,

    /// A cool-down pause was scheduled before the next attempt.
    ///
    /// Sets: `feed`, `attempt` (the attempt just finished), `delay_ms`,
    /// `source` (failure- or success-driven), and `reason` for
    /// failure-driven cool-downs.
    CooldownScheduled,

    /// The restart policy forbids further attempts; the loop exited.
    ///
    /// Sets: `feed`, `attempt`.
    FeedRetired,

    // === Shutdown ===
    /// A termination request was observed; cancellation has been triggered.
    ShutdownRequested,

    /// The feed unwound within the configured grace period.
    AllStoppedWithinGrace,

    /// The grace period lapsed before the feed unwound.
    GraceExceeded,
}

/// Whether a cool-down was scheduled after a failure or after a successful
/// run (keep-alive pacing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownSource {
    Success,
    Failure,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - remaining fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Name of the supervised feed, if applicable.
    pub feed: Option<Arc<str>>,
    /// Attempt count (1-based).
    pub attempt: Option<u32>,
    /// Cool-down delay before the next attempt, in milliseconds.
    pub delay_ms: Option<u32>,
    /// Human-readable failure reason.
    pub reason: Option<Arc<str>>,
    /// What drove a scheduled cool-down (success vs failure).
    pub source: Option<CooldownSource>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// the next global sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            feed: None,
            attempt: None,
            delay_ms: None,
            reason: None,
            source: None,
        }
    }

    /// Attaches the feed name.
    #[inline]
    pub fn with_feed(mut self, feed: impl Into<Arc<str>>) -> Self {
        self.feed = Some(feed.into());
        self
    }

    /// Attaches an attempt count.
    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a cool-down delay (stored as milliseconds, saturating).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Marks the cool-down as driven by a successful run.
    #[inline]
    pub fn with_success_source(mut self) -> Self {
        self.source = Some(CooldownSource::Success);
        self
    }

    /// Marks the cool-down as driven by a failed attempt.
    #[inline]
    pub fn with_failure_source(mut self) -> Self {
        self.source = Some(CooldownSource::Failure);
        self
    }
}
