//! # Supervisor: wires the restart loop to the shutdown coordinator.
//!
//! The [`Supervisor`] owns the event bus, the subscriber list, and the
//! runtime configuration. It spawns the feed worker on its own task, blocks
//! on the process's termination request, and on receipt cancels the worker
//! and joins it within a bounded grace period.
//!
//! ## High-level flow
//! ```text
//! Supervisor::run(spec)
//!   ├─► TerminationSignals::register()           (fail fast if impossible)
//!   ├─► subscriber listener: Bus ──► Subscribe::on_event for each subscriber
//!   ├─► spawn FeedWorker::run(child token)
//!   └─► select:
//!        ├─ worker finished on its own      → Ok(())
//!        └─ termination request
//!             ├─► publish ShutdownRequested
//!             ├─► token.cancel()             (idempotent, one-shot)
//!             └─► join worker within grace:
//!                   ├─ Ok      → publish AllStoppedWithinGrace
//!                   └─ Timeout → abort worker, publish GraceExceeded,
//!                                Err(RuntimeError::GraceExceeded)
//! ```
//!
//! Lifetime states: `Running` (feed active) → `ShuttingDown` (cancellation
//! triggered, worker draining) → `Terminated` (run returns). The first
//! termination request drives the transition; later ones have no extra
//! effect.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use feedvisor::{FeedError, FeedFn, FeedRef, FeedSpec, LogWriter, Supervisor, SupervisorConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = SupervisorConfig::default();
//!     let sup = Supervisor::new(cfg.clone(), vec![Arc::new(LogWriter::new())]);
//!
//!     let feed: FeedRef = FeedFn::arc("market-feed", |ctx: CancellationToken| async move {
//!         while !ctx.is_cancelled() {
//!             // ingest a batch...
//!             tokio::time::sleep(std::time::Duration::from_millis(250)).await;
//!         }
//!         Ok::<(), FeedError>(())
//!     });
//!
//!     sup.run(FeedSpec::with_defaults(feed, &cfg)).await?;
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::core::{shutdown::TerminationSignals, worker::FeedWorker};
use crate::{
    config::SupervisorConfig,
    error::RuntimeError,
    events::{Bus, Event, EventKind},
    feeds::FeedSpec,
    subscribers::Subscribe,
};

/// Coordinates the feed worker, event delivery, and graceful shutdown.
pub struct Supervisor {
    /// Global runtime configuration.
    pub cfg: SupervisorConfig,
    /// Event bus shared with the worker.
    pub bus: Bus,
    /// Subscribers notified of every runtime event.
    subs: Arc<[Arc<dyn Subscribe>]>,
}

impl Supervisor {
    /// Creates a new supervisor with the given config and subscribers.
    pub fn new(cfg: SupervisorConfig, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        Self {
            cfg,
            bus,
            subs: subscribers.into(),
        }
    }

    /// Supervises the feed until an OS termination request arrives (or, under
    /// [`RestartPolicy::OnFailure`](crate::RestartPolicy::OnFailure), until
    /// the feed retires itself).
    ///
    /// Signal handlers are installed before the feed starts; if that fails,
    /// returns [`RuntimeError::Signal`] without running anything.
    pub async fn run(&self, spec: FeedSpec) -> Result<(), RuntimeError> {
        let mut signals = TerminationSignals::register()?;
        self.run_until(spec, async move { signals.recv().await })
            .await
    }

    /// Supervises the feed until the given `shutdown` future completes.
    ///
    /// [`Supervisor::run`] is this with the OS signal listener as the
    /// shutdown future; tests drive the same path with arbitrary triggers.
    pub async fn run_until<F>(&self, spec: FeedSpec, shutdown: F) -> Result<(), RuntimeError>
    where
        F: Future<Output = ()>,
    {
        self.spawn_subscriber_listener();

        let token = CancellationToken::new();
        let worker = FeedWorker::new(spec, self.bus.clone());
        let mut handle = tokio::spawn(worker.run(token.child_token()));

        tokio::select! {
            _ = shutdown => {
                self.bus.publish(Event::new(EventKind::ShutdownRequested));
                token.cancel();
                self.join_with_grace(&mut handle).await
            }
            _ = &mut handle => Ok(()),
        }
    }

    /// Forwards bus events to the subscribers, in order, on a dedicated task.
    ///
    /// Skipped entirely when no subscribers are registered. The task ends
    /// once the bus closes (supervisor dropped).
    fn spawn_subscriber_listener(&self) {
        if self.subs.is_empty() {
            return;
        }
        let mut rx = self.bus.subscribe();
        let subs = Arc::clone(&self.subs);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => {
                        for sub in subs.iter() {
                            sub.on_event(&ev).await;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }

    /// Joins the worker within the configured grace period.
    ///
    /// Publishes [`EventKind::AllStoppedWithinGrace`] on success; on timeout
    /// aborts the worker, publishes [`EventKind::GraceExceeded`], and returns
    /// [`RuntimeError::GraceExceeded`].
    async fn join_with_grace(&self, handle: &mut JoinHandle<()>) -> Result<(), RuntimeError> {
        let grace = self.cfg.grace;
        match time::timeout(grace, &mut *handle).await {
            Ok(_) => {
                self.bus.publish(Event::new(EventKind::AllStoppedWithinGrace));
                Ok(())
            }
            Err(_) => {
                handle.abort();
                self.bus.publish(Event::new(EventKind::GraceExceeded));
                Err(RuntimeError::GraceExceeded { grace })
            }
        }
    }
}
