//! # Demo: keep_alive
//!
//! A long-lived feed supervised under `RestartPolicy::KeepAlive`: it is
//! restarted after success as well as after failure, and the process shuts
//! down gracefully on Ctrl-C / SIGTERM.
//!
//! ## Run
//! ```bash
//! RUST_LOG=info cargo run --example keep_alive
//! # press Ctrl-C to trigger graceful shutdown
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use feedvisor::{
    FeedError, FeedFn, FeedRef, FeedSpec, LogWriter, RestartPolicy, Supervisor, SupervisorConfig,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut cfg = SupervisorConfig::default();
    cfg.grace = Duration::from_secs(5);

    let sup = Supervisor::new(cfg.clone(), vec![Arc::new(LogWriter::new())]);

    // A "batch" feed: ingest for a bit, return, get restarted after a pause.
    let ticker: FeedRef = FeedFn::arc("ticker", |ctx: CancellationToken| async move {
        for i in 0..5 {
            if ctx.is_cancelled() {
                return Err(FeedError::Canceled);
            }
            println!("[ticker] batch {i}");
            tokio::time::sleep(Duration::from_millis(400)).await;
        }
        Ok(())
    });

    let spec = FeedSpec::with_defaults(ticker, &cfg)
        .with_restart(RestartPolicy::keep_alive_every(Duration::from_secs(1)));

    // Blocks until Ctrl-C / SIGTERM, then cancels the feed and joins it.
    sup.run(spec).await?;

    println!("shut down cleanly.");
    Ok(())
}
