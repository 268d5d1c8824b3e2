//! Integration tests for `Poller` timing.
//!
//! Uses paused Tokio time, so sleeps inside refreshes and between ticks
//! resolve as soon as the runtime is idle.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use pitchside_tick::{COMMENTARY_INTERVAL, LIVE_MATCH_INTERVAL, Poller, TickConfig};
use tokio::sync::mpsc;
use tokio::time::Instant;

// =========================================================================
// Helpers
// =========================================================================

/// Spawns a poller that reports the offset of every refresh from `start`.
fn recording_poller(
    config: TickConfig,
) -> (Poller, mpsc::UnboundedReceiver<Duration>) {
    let start = Instant::now();
    let (tx, rx) = mpsc::unbounded_channel();
    let poller = Poller::spawn("recording", config, move || {
        let tx = tx.clone();
        async move {
            let _ = tx.send(start.elapsed());
        }
    });
    (poller, rx)
}

fn drain(rx: &mut mpsc::UnboundedReceiver<Duration>) -> Vec<Duration> {
    let mut seen = Vec::new();
    while let Ok(at) = rx.try_recv() {
        seen.push(at);
    }
    seen
}

// =========================================================================
// Cadence
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_commentary_refreshes_every_five_seconds() {
    let (poller, mut rx) = recording_poller(TickConfig::every(COMMENTARY_INTERVAL));

    tokio::time::sleep(Duration::from_millis(30_500)).await;

    let secs: Vec<u64> = drain(&mut rx).iter().map(Duration::as_secs).collect();
    assert_eq!(secs, [0, 5, 10, 15, 20, 25, 30]);
    poller.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_first_repeat_waits_a_full_interval() {
    let (poller, mut rx) = recording_poller(TickConfig::every(LIVE_MATCH_INTERVAL));

    tokio::time::sleep(Duration::from_secs(29)).await;
    assert_eq!(drain(&mut rx).len(), 1, "only the immediate refresh");

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(drain(&mut rx).len(), 1, "the 30 s refresh");
    poller.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_jitter_delays_first_repeat_within_bound() {
    let config = TickConfig::every(Duration::from_secs(1))
        .with_jitter(Duration::from_millis(500));
    let (poller, mut rx) = recording_poller(config);

    tokio::time::sleep(Duration::from_millis(1600)).await;

    let seen = drain(&mut rx);
    assert!(seen.len() >= 2, "{seen:?}");
    assert!(seen[1] >= Duration::from_secs(1));
    assert!(seen[1] < Duration::from_millis(1500));
    poller.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_disabled_interval_refreshes_once() {
    let (poller, mut rx) = recording_poller(TickConfig::default());

    tokio::time::sleep(Duration::from_secs(3600)).await;

    assert_eq!(drain(&mut rx), [Duration::ZERO]);
    assert!(!poller.is_finished(), "still waiting for shutdown");
    poller.shutdown().await;
}

// =========================================================================
// Overruns
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_slow_refresh_does_not_cause_catch_up_burst() {
    let runs = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&runs);
    let poller = Poller::spawn(
        "slow-first",
        TickConfig::every(Duration::from_secs(10)),
        move || {
            let counter = Arc::clone(&counter);
            async move {
                // The first refresh overruns three intervals.
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    tokio::time::sleep(Duration::from_secs(35)).await;
                }
            }
        },
    );

    // Runs start at 0 s, 35 s (late tick), then back on the grid at 40 s.
    tokio::time::sleep(Duration::from_secs(45)).await;

    assert_eq!(runs.load(Ordering::SeqCst), 3);
    poller.shutdown().await;
}
