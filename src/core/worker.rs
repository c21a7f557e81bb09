//! # FeedWorker: the supervised restart loop.
//!
//! Drives the single feed: run an attempt, classify the outcome, pause, and
//! decide whether to go again. This is the core of the crate.
//!
//! ```text
//! FeedSpec ──► Supervisor ──► FeedWorker::run(token)
//!
//! loop {
//!   ├─► exit if token cancelled
//!   ├─► attempt += 1
//!   ├─► publish FeedStarting
//!   ├─► run_once() ──► publish FeedStopped / FeedFailed
//!   ├─► Ok:
//!   │     ├─► RestartPolicy::OnFailure  → publish FeedRetired, exit
//!   │     └─► RestartPolicy::KeepAlive  → optional pause, continue
//!   ├─► Err(Canceled) → exit (graceful stop)
//!   └─► Err(failure):
//!         ├─► delay = cooldown.next(..)
//!         ├─► publish CooldownScheduled
//!         └─► cancellable sleep(delay), continue
//! }
//! ```
//!
//! ## Rules
//! - Attempts run **sequentially**; there is never more than one in flight.
//! - The attempt counter is 1-based and **never resets**.
//! - Every pause is a race against the cancellation token, so a shutdown
//!   request never waits out a cool-down.

use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::{
    core::attempt::run_once,
    error::FeedError,
    events::{Bus, Event, EventKind},
    feeds::{FeedRef, FeedSpec},
    policies::{CooldownPolicy, RestartPolicy},
};

/// Runs the feed until retirement or cancellation.
pub(crate) struct FeedWorker {
    feed: FeedRef,
    restart: RestartPolicy,
    cooldown: CooldownPolicy,
    bus: Bus,
}

impl FeedWorker {
    /// Creates a worker from a spec and the shared event bus.
    pub(crate) fn new(spec: FeedSpec, bus: Bus) -> Self {
        Self {
            restart: spec.restart(),
            cooldown: spec.cooldown(),
            feed: spec.feed().clone(),
            bus,
        }
    }

    /// Runs the loop until the restart policy retires the feed or the token
    /// is cancelled.
    ///
    /// ### Exit conditions
    /// - `token` is cancelled (observed before an attempt, during a pause, or
    ///   acknowledged by the feed as `FeedError::Canceled`)
    /// - the feed succeeds under [`RestartPolicy::OnFailure`]
    pub(crate) async fn run(self, token: CancellationToken) {
        let mut attempt: u32 = 0;

        loop {
            if token.is_cancelled() {
                break;
            }

            attempt += 1;
            self.bus.publish(
                Event::new(EventKind::FeedStarting)
                    .with_feed(self.feed.name())
                    .with_attempt(attempt),
            );

            match run_once(self.feed.as_ref(), &token, attempt, &self.bus).await {
                Ok(()) => match self.restart {
                    RestartPolicy::OnFailure => {
                        self.bus.publish(
                            Event::new(EventKind::FeedRetired)
                                .with_feed(self.feed.name())
                                .with_attempt(attempt),
                        );
                        break;
                    }
                    RestartPolicy::KeepAlive { pause } => {
                        if let Some(pause) = pause.filter(|p| !p.is_zero()) {
                            self.bus.publish(
                                Event::new(EventKind::CooldownScheduled)
                                    .with_feed(self.feed.name())
                                    .with_attempt(attempt)
                                    .with_delay(pause)
                                    .with_success_source(),
                            );
                            if !self.pause(pause, &token).await {
                                break;
                            }
                        }
                    }
                },
                Err(FeedError::Canceled) => break,
                Err(err) => {
                    let delay = self.cooldown.next(attempt - 1);
                    self.bus.publish(
                        Event::new(EventKind::CooldownScheduled)
                            .with_feed(self.feed.name())
                            .with_attempt(attempt)
                            .with_delay(delay)
                            .with_reason(err.to_string())
                            .with_failure_source(),
                    );
                    if !self.pause(delay, &token).await {
                        break;
                    }
                }
            }
        }
    }

    /// Sleeps for `delay` unless cancellation lands first.
    ///
    /// Returns `false` if the wait was interrupted by cancellation.
    async fn pause(&self, delay: Duration, token: &CancellationToken) -> bool {
        tokio::select! {
            _ = time::sleep(delay) => true,
            _ = token.cancelled() => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::FeedFn;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::Instant;

    fn fails_then_succeeds(failures: u32) -> (FeedRef, Arc<AtomicU32>) {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();
        let feed: FeedRef = FeedFn::arc("flaky", move |_ctx: CancellationToken| {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n <= failures {
                    Err(FeedError::failed("connection refused"))
                } else {
                    Ok(())
                }
            }
        });
        (feed, attempts)
    }

    fn always_fails() -> (FeedRef, Arc<AtomicU32>) {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();
        let feed: FeedRef = FeedFn::arc("broken", move |_ctx: CancellationToken| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { Err(FeedError::failed("boom")) }
        });
        (feed, attempts)
    }

    fn worker(feed: FeedRef, restart: RestartPolicy, cooldown: Duration) -> FeedWorker {
        let spec = FeedSpec::new(feed, restart, CooldownPolicy::fixed(cooldown));
        FeedWorker::new(spec, Bus::new(64))
    }

    #[tokio::test]
    async fn retries_failures_until_success_then_retires() {
        let (feed, attempts) = fails_then_succeeds(2);
        let cooldown = Duration::from_millis(50);
        let w = worker(feed, RestartPolicy::OnFailure, cooldown);

        let started = Instant::now();
        w.run(CancellationToken::new()).await;

        // two failures then one success: exactly three attempts
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        // two cool-downs must have elapsed between the attempts
        assert!(started.elapsed() >= cooldown * 2);
    }

    #[tokio::test]
    async fn cancellation_during_cooldown_stops_retries() {
        let (feed, attempts) = always_fails();
        let w = worker(feed, RestartPolicy::OnFailure, Duration::from_secs(30));

        let token = CancellationToken::new();
        let handle = tokio::spawn(w.run(token.child_token()));

        // let the first attempt fail and the cool-down begin
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
        handle.await.expect("worker panicked");

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancelling_twice_behaves_like_once() {
        let (feed, attempts) = always_fails();
        let w = worker(feed, RestartPolicy::OnFailure, Duration::from_secs(30));

        let token = CancellationToken::new();
        let handle = tokio::spawn(w.run(token.child_token()));

        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
        token.cancel();
        handle.await.expect("worker panicked");

        assert!(token.is_cancelled());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancellation_before_first_attempt_runs_nothing() {
        let (feed, attempts) = always_fails();
        let w = worker(feed, RestartPolicy::OnFailure, Duration::from_millis(10));

        let token = CancellationToken::new();
        token.cancel();
        w.run(token).await;

        assert_eq!(attempts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn attempts_never_overlap() {
        let in_flight = Arc::new(AtomicU32::new(0));
        let overlapped = Arc::new(AtomicU32::new(0));
        let runs = Arc::new(AtomicU32::new(0));

        let (gauge, seen, counter) = (in_flight.clone(), overlapped.clone(), runs.clone());
        let feed: FeedRef = FeedFn::arc("gauge", move |_ctx: CancellationToken| {
            let (gauge, seen, counter) = (gauge.clone(), seen.clone(), counter.clone());
            async move {
                if gauge.fetch_add(1, Ordering::SeqCst) > 0 {
                    seen.fetch_add(1, Ordering::SeqCst);
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
                gauge.fetch_sub(1, Ordering::SeqCst);
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if n % 2 == 0 {
                    Ok(())
                } else {
                    Err(FeedError::failed("flap"))
                }
            }
        });

        let w = worker(feed, RestartPolicy::keep_alive(), Duration::from_millis(1));
        let token = CancellationToken::new();
        let handle = tokio::spawn(w.run(token.child_token()));

        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
        handle.await.expect("worker panicked");

        assert!(runs.load(Ordering::SeqCst) >= 2, "expected several runs");
        assert_eq!(overlapped.load(Ordering::SeqCst), 0, "attempts overlapped");
    }

    #[tokio::test]
    async fn keep_alive_restarts_after_success() {
        let runs = Arc::new(AtomicU32::new(0));
        let counter = runs.clone();
        let feed: FeedRef = FeedFn::arc("steady", move |_ctx: CancellationToken| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { Ok(()) }
        });

        let w = worker(
            feed,
            RestartPolicy::keep_alive_every(Duration::from_millis(10)),
            Duration::from_millis(10),
        );
        let token = CancellationToken::new();
        let handle = tokio::spawn(w.run(token.child_token()));

        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
        handle.await.expect("worker panicked");

        assert!(
            runs.load(Ordering::SeqCst) >= 2,
            "keep-alive should restart after success"
        );
    }

    #[tokio::test]
    async fn acknowledged_cancellation_counts_as_graceful_stop() {
        let feed: FeedRef = FeedFn::arc("ack", |ctx: CancellationToken| async move {
            ctx.cancelled().await;
            Err(FeedError::Canceled)
        });

        let spec = FeedSpec::new(
            feed,
            RestartPolicy::OnFailure,
            CooldownPolicy::fixed(Duration::from_secs(30)),
        );
        let bus = Bus::new(64);
        let mut events = bus.subscribe();
        let w = FeedWorker::new(spec, bus);

        let token = CancellationToken::new();
        let handle = tokio::spawn(w.run(token.child_token()));

        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel();
        handle.await.expect("worker panicked");

        // the acknowledgement is reported as a graceful stop, not a failure
        let mut kinds = Vec::new();
        while let Ok(ev) = events.try_recv() {
            kinds.push(ev.kind);
        }
        assert!(kinds.contains(&EventKind::FeedStopped));
        assert!(!kinds.contains(&EventKind::FeedFailed));
    }
}
