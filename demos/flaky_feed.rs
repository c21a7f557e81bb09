//! # Demo: flaky_feed
//!
//! A feed that fails twice ("connection refused") before succeeding, showing
//! how the supervisor retries with a cool-down and then retires the feed
//! under the default `RestartPolicy::OnFailure`.
//!
//! ## Flow
//! ```text
//! FeedWorker::run()
//!   ├─► publish(FeedStarting, attempt=1)
//!   ├─► run_once() → Err("connection refused")
//!   ├─► publish(FeedFailed) → publish(CooldownScheduled{500ms}) → sleep
//!   ├─► attempt=2 → same again
//!   ├─► attempt=3 → Ok(())
//!   ├─► publish(FeedStopped)
//!   └─► publish(FeedRetired)
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example flaky_feed
//! ```

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use feedvisor::{
    CooldownPolicy, FeedError, FeedFn, FeedRef, FeedSpec, LogWriter, Supervisor, SupervisorConfig,
};

static ATTEMPTS: AtomicU32 = AtomicU32::new(0);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    // 1. Configure the runtime: short cool-down so the demo moves along
    let mut cfg = SupervisorConfig::default();
    cfg.cooldown = CooldownPolicy::fixed(Duration::from_millis(500));
    cfg.grace = Duration::from_secs(5);

    // 2. Create the supervisor with the built-in log subscriber
    let sup = Supervisor::new(cfg.clone(), vec![Arc::new(LogWriter::new())]);

    // 3. Define a feed that fails twice before succeeding
    let flaky: FeedRef = FeedFn::arc("flaky", |ctx: CancellationToken| async move {
        if ctx.is_cancelled() {
            return Err(FeedError::Canceled);
        }
        let attempt = ATTEMPTS.fetch_add(1, Ordering::Relaxed) + 1;
        if attempt <= 2 {
            Err(FeedError::failed("connection refused"))
        } else {
            Ok(())
        }
    });

    // 4. Run under the default policy: retried until it succeeds, then retired
    sup.run(FeedSpec::with_defaults(flaky, &cfg)).await?;

    println!("done.");
    Ok(())
}
