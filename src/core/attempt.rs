//! # Run a single feed attempt.
//!
//! Executes one attempt of a [`Feed`] and publishes its terminal event to the
//! [`Bus`].
//!
//! ## Rules
//! - Publishes **exactly one** terminal event per attempt:
//!   `FeedStopped` or `FeedFailed`.
//! - `Canceled` is a graceful stop → `FeedStopped`, never `FeedFailed`.
//! - Each attempt gets a **child token** of the runtime token, so the
//!   runtime's cancellation reaches the feed while attempts stay isolated
//!   from one another.

use tokio_util::sync::CancellationToken;

use crate::{
    error::FeedError,
    events::{Bus, Event, EventKind},
    feeds::Feed,
};

/// Executes a single attempt of `feed`, publishing the terminal event to `bus`.
pub(crate) async fn run_once(
    feed: &dyn Feed,
    runtime_token: &CancellationToken,
    attempt: u32,
    bus: &Bus,
) -> Result<(), FeedError> {
    let ctx = runtime_token.child_token();

    match feed.run(ctx).await {
        Ok(()) => {
            publish_stopped(bus, feed.name(), attempt);
            Ok(())
        }
        Err(FeedError::Canceled) => {
            publish_stopped(bus, feed.name(), attempt);
            Err(FeedError::Canceled)
        }
        Err(err) => {
            publish_failed(bus, feed.name(), attempt, &err);
            Err(err)
        }
    }
}

/// Publishes `FeedStopped` (success or graceful cancellation).
fn publish_stopped(bus: &Bus, name: &str, attempt: u32) {
    bus.publish(
        Event::new(EventKind::FeedStopped)
            .with_feed(name)
            .with_attempt(attempt),
    );
}

/// Publishes `FeedFailed` with the failure reason.
fn publish_failed(bus: &Bus, name: &str, attempt: u32, err: &FeedError) {
    bus.publish(
        Event::new(EventKind::FeedFailed)
            .with_feed(name)
            .with_attempt(attempt)
            .with_reason(err.to_string()),
    );
}
