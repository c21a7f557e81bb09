//! # LogWriter — structured event logging.
//!
//! A subscriber that renders every runtime [`Event`] as a `tracing` record.
//! Failures carry the failure reason at `warn` level; the shutdown notice is
//! a single `info` record; routine lifecycle transitions log at `debug`.
//!
//! ## Example output
//! ```text
//! DEBUG feed_starting{feed="market-feed" attempt=1}
//!  WARN feed_failed{feed="market-feed" attempt=1 reason="connection refused"}
//!  INFO cooldown_scheduled{feed="market-feed" delay_ms=5000 source="failure"}
//!  INFO shutting down gracefully
//! ```

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::events::{CooldownSource, Event, EventKind};
use crate::subscribers::Subscribe;

/// Event-to-log subscriber.
#[derive(Debug, Default)]
pub struct LogWriter;

impl LogWriter {
    /// Constructs a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let feed = e.feed.as_deref().unwrap_or("<feed>");
        match e.kind {
            EventKind::FeedStarting => {
                debug!(feed, attempt = e.attempt, "starting feed attempt");
            }
            EventKind::FeedStopped => {
                debug!(feed, attempt = e.attempt, "feed stopped");
            }
            EventKind::FeedFailed => {
                warn!(
                    feed,
                    attempt = e.attempt,
                    reason = e.reason.as_deref().unwrap_or("<unknown>"),
                    "feed failed"
                );
            }
            EventKind::CooldownScheduled => {
                let source = match e.source {
                    Some(CooldownSource::Failure) => "failure",
                    Some(CooldownSource::Success) => "success",
                    None => "unknown",
                };
                info!(
                    feed,
                    delay_ms = e.delay_ms,
                    source,
                    "cool-down before next attempt"
                );
            }
            EventKind::FeedRetired => {
                info!(feed, attempt = e.attempt, "feed retired");
            }
            EventKind::ShutdownRequested => {
                info!("shutting down gracefully");
            }
            EventKind::AllStoppedWithinGrace => {
                info!("feed stopped within grace period");
            }
            EventKind::GraceExceeded => {
                error!("shutdown grace period exceeded; feed force-terminated");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log_writer"
    }
}
