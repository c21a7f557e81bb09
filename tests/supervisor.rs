//! End-to-end supervision behavior, driven through `Supervisor::run_until`
//! with a `Notify`-backed termination request instead of real OS signals.

use std::future::pending;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use feedvisor::{
    CooldownPolicy, Event, EventKind, FeedError, FeedFn, FeedRef, FeedSpec, RestartPolicy,
    Subscribe, Supervisor, SupervisorConfig,
};

fn config(cooldown: Duration, grace: Duration) -> SupervisorConfig {
    SupervisorConfig {
        cooldown: CooldownPolicy::fixed(cooldown),
        grace,
        ..SupervisorConfig::default()
    }
}

/// Feed that fails `failures` times with "connection refused", then succeeds.
fn flaky_feed(failures: u32) -> (FeedRef, Arc<AtomicU32>) {
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

fn drain(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<Event> {
    let mut out = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        out.push(ev);
    }
    out
}

#[tokio::test]
async fn fails_twice_then_succeeds_and_retires() {
    let cooldown = Duration::from_millis(100);
    let cfg = config(cooldown, Duration::from_secs(1));
    let sup = Supervisor::new(cfg.clone(), vec![]);
    let mut rx = sup.bus.subscribe();

    let (feed, attempts) = flaky_feed(2);
    let spec = FeedSpec::with_defaults(feed, &cfg);

    let started = Instant::now();
    // No termination request: the loop retires itself after the success.
    sup.run_until(spec, pending::<()>())
        .await
        .expect("supervision failed");

    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert!(started.elapsed() >= cooldown * 2);

    let events = drain(&mut rx);
    let failures: Vec<&Event> = events
        .iter()
        .filter(|e| e.kind == EventKind::FeedFailed)
        .collect();
    assert_eq!(failures.len(), 2);
    for failure in &failures {
        let reason = failure.reason.as_deref().expect("failure without reason");
        assert!(reason.contains("connection refused"), "reason: {reason}");
    }
    assert!(events.iter().any(|e| e.kind == EventKind::FeedRetired));

    // sequence numbers restore publish order
    let seqs: Vec<u64> = events.iter().map(|e| e.seq).collect();
    assert!(seqs.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn termination_during_cooldown_stops_retries() {
    let cfg = config(Duration::from_secs(30), Duration::from_secs(1));
    let sup = Supervisor::new(cfg.clone(), vec![]);
    let mut rx = sup.bus.subscribe();

    let (feed, attempts) = flaky_feed(u32::MAX);
    let spec = FeedSpec::with_defaults(feed, &cfg);

    let stop = Arc::new(Notify::new());
    let trigger = stop.clone();
    let (res, ()) = tokio::join!(
        sup.run_until(spec, async { stop.notified().await }),
        async move {
            // land the termination request inside the first cool-down
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.notify_one();
        }
    );

    res.expect("graceful shutdown failed");
    assert_eq!(attempts.load(Ordering::SeqCst), 1);

    let events = drain(&mut rx);
    assert!(events.iter().any(|e| e.kind == EventKind::ShutdownRequested));
    assert!(events
        .iter()
        .any(|e| e.kind == EventKind::AllStoppedWithinGrace));
    // no second attempt was started after the request
    let starts = events
        .iter()
        .filter(|e| e.kind == EventKind::FeedStarting)
        .count();
    assert_eq!(starts, 1);
}

#[tokio::test]
async fn termination_request_sets_cancellation_for_running_feed() {
    let cfg = config(Duration::from_millis(10), Duration::from_secs(1));
    let sup = Supervisor::new(cfg.clone(), vec![]);

    let observed = Arc::new(AtomicBool::new(false));
    let flag = observed.clone();
    let feed: FeedRef = FeedFn::arc("watcher", move |ctx: CancellationToken| {
        let flag = flag.clone();
        async move {
            ctx.cancelled().await;
            flag.store(true, Ordering::SeqCst);
            Err(FeedError::Canceled)
        }
    });

    let stop = Arc::new(Notify::new());
    let trigger = stop.clone();
    let (res, ()) = tokio::join!(
        sup.run_until(
            FeedSpec::with_defaults(feed, &cfg),
            async { stop.notified().await }
        ),
        async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.notify_one();
        }
    );

    res.expect("graceful shutdown failed");
    assert!(
        observed.load(Ordering::SeqCst),
        "feed never observed cancellation"
    );
}

#[tokio::test]
async fn keep_alive_restarts_after_success_until_terminated() {
    let cfg = config(Duration::from_millis(10), Duration::from_secs(1));
    let sup = Supervisor::new(cfg.clone(), vec![]);

    let runs = Arc::new(AtomicU32::new(0));
    let counter = runs.clone();
    let feed: FeedRef = FeedFn::arc("steady", move |_ctx: CancellationToken| {
        counter.fetch_add(1, Ordering::SeqCst);
        async move { Ok(()) }
    });
    let spec = FeedSpec::with_defaults(feed, &cfg)
        .with_restart(RestartPolicy::keep_alive_every(Duration::from_millis(20)));

    let stop = Arc::new(Notify::new());
    let trigger = stop.clone();
    let (res, ()) = tokio::join!(
        sup.run_until(spec, async { stop.notified().await }),
        async move {
            tokio::time::sleep(Duration::from_millis(150)).await;
            trigger.notify_one();
        }
    );

    res.expect("graceful shutdown failed");
    assert!(
        runs.load(Ordering::SeqCst) >= 2,
        "keep-alive should have restarted the feed after success"
    );
}

#[tokio::test]
async fn unresponsive_feed_exceeds_grace() {
    let cfg = config(Duration::from_millis(10), Duration::from_millis(100));
    let sup = Supervisor::new(cfg.clone(), vec![]);
    let mut rx = sup.bus.subscribe();

    // ignores its token entirely
    let feed: FeedRef = FeedFn::arc("stuck", |_ctx: CancellationToken| async move {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    });

    let stop = Arc::new(Notify::new());
    let trigger = stop.clone();
    let (res, ()) = tokio::join!(
        sup.run_until(
            FeedSpec::with_defaults(feed, &cfg),
            async { stop.notified().await }
        ),
        async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.notify_one();
        }
    );

    let err = res.expect_err("expected the grace period to lapse");
    assert_eq!(err.as_label(), "runtime_grace_exceeded");
    let events = drain(&mut rx);
    assert!(events.iter().any(|e| e.kind == EventKind::GraceExceeded));
}

/// Subscriber that records every event kind it sees.
#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<EventKind>>,
}

#[async_trait::async_trait]
impl Subscribe for Recorder {
    async fn on_event(&self, event: &Event) {
        self.seen.lock().expect("recorder poisoned").push(event.kind);
    }

    fn name(&self) -> &'static str {
        "recorder"
    }
}

#[tokio::test]
async fn subscribers_receive_failure_and_shutdown_events() {
    let cfg = config(Duration::from_secs(30), Duration::from_secs(1));
    let recorder = Arc::new(Recorder::default());
    let sup = Supervisor::new(cfg.clone(), vec![recorder.clone()]);

    let (feed, _attempts) = flaky_feed(u32::MAX);
    let spec = FeedSpec::with_defaults(feed, &cfg);

    let stop = Arc::new(Notify::new());
    let trigger = stop.clone();
    let (res, ()) = tokio::join!(
        sup.run_until(spec, async { stop.notified().await }),
        async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.notify_one();
        }
    );
    res.expect("graceful shutdown failed");

    // delivery runs on the listener task; give it a moment to drain
    let deadline = Instant::now() + Duration::from_secs(1);
    loop {
        {
            let seen = recorder.seen.lock().expect("recorder poisoned");
            if seen.contains(&EventKind::FeedFailed) && seen.contains(&EventKind::ShutdownRequested)
            {
                break;
            }
        }
        assert!(Instant::now() < deadline, "subscriber never saw the events");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
