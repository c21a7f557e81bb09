//! # feedvisor
//!
//! **feedvisor** keeps a single long-lived background operation — "the feed"
//! — alive for the lifetime of a process: run it, restart it after failures
//! with a cool-down, and shut it down promptly and cleanly when the operating
//! environment asks the process to stop.
//!
//! ## Architecture
//! ```text
//!     ┌────────────────┐
//!     │    FeedSpec    │  feed + restart policy + cool-down policy
//!     └───────┬────────┘
//!             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │ Supervisor                                               │
//! │  - registers termination signal handlers                 │
//! │  - spawns the FeedWorker with a child CancellationToken  │
//! │  - fans out Bus events to subscribers                    │
//! │  - on signal: cancel + join within grace                 │
//! └───────┬──────────────────────────────────────────────────┘
//!         ▼
//!     ┌────────────────┐     publishes FeedStarting / FeedFailed /
//!     │   FeedWorker   │ ──► FeedStopped / CooldownScheduled /
//!     │ (restart loop) │     FeedRetired to the Bus
//!     └────────────────┘
//! ```
//!
//! ### Lifecycle of one supervised feed
//! ```text
//! loop {
//!   ├─► exit if cancelled
//!   ├─► run one attempt (child token per attempt)
//!   │     ├─ Ok   → OnFailure: retire │ KeepAlive: pause, go again
//!   │     └─ Err  → log reason, cool down (cancellable), go again
//!   └─► every pause races the cancellation token, so shutdown
//!       never waits out a cool-down
//! }
//! ```
//!
//! Cancellation is cooperative: the feed receives a
//! [`CancellationToken`](tokio_util::sync::CancellationToken) and must poll
//! it at its own blocking points. The token is one-shot — once cancelled it
//! never resets — and is always passed explicitly, never held in a global.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use feedvisor::{
//!     FeedError, FeedFn, FeedRef, FeedSpec, LogWriter, RestartPolicy, Supervisor,
//!     SupervisorConfig,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = SupervisorConfig::default();
//!     let sup = Supervisor::new(cfg.clone(), vec![Arc::new(LogWriter::new())]);
//!
//!     let feed: FeedRef = FeedFn::arc("market-feed", |ctx: CancellationToken| async move {
//!         while !ctx.is_cancelled() {
//!             // connect, ingest, persist...
//!             tokio::time::sleep(std::time::Duration::from_millis(250)).await;
//!         }
//!         Ok::<(), FeedError>(())
//!     });
//!
//!     let spec = FeedSpec::with_defaults(feed, &cfg).with_restart(RestartPolicy::keep_alive());
//!     sup.run(spec).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod feeds;
mod policies;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::Supervisor;
pub use config::SupervisorConfig;
pub use error::{FeedError, RuntimeError};
pub use events::{Bus, CooldownSource, Event, EventKind};
pub use feeds::{Feed, FeedFn, FeedRef, FeedSpec};
pub use policies::{CooldownPolicy, RestartPolicy, DEFAULT_COOLDOWN};
pub use subscribers::{LogWriter, Subscribe};
