//! Integration tests for the background expiry sweep.
//!
//! Two clocks are in play: paused Tokio time decides *when* the sweep
//! runs, the `ManualClock` decides *what time the store thinks it is*.
//! Assertions look at raw storage so that the lazy check inside
//! `current_principal()` can't be what cleared the session.

use std::time::Duration;

use pitchside_protocol::{Principal, Role};
use pitchside_session::{
    ExpirySweep, ManualClock, MemoryStorage, SessionConfig, SessionStore,
    TabStorage, PRINCIPAL_KEY,
};

const T0: u64 = 1_700_000_000_000;

fn fixture(config: SessionConfig) -> (SessionStore, MemoryStorage, ManualClock) {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new(T0);
    let store = SessionStore::open(config, storage.clone(), clock.clone());
    (store, storage, clock)
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

#[tokio::test(start_paused = true)]
async fn test_sweep_clears_expired_session_on_next_tick() {
    let (store, storage, clock) = fixture(SessionConfig::default());
    store
        .login_for(Principal::new("u1", Role::Captain), Duration::from_secs(90))
        .unwrap();
    let sweep = ExpirySweep::spawn(store.clone(), Duration::from_secs(60));
    let mut rx = store.subscribe();
    settle().await;

    clock.advance(Duration::from_secs(100));
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(
        storage.get(PRINCIPAL_KEY).is_some(),
        "no tick yet, nothing swept"
    );

    tokio::time::sleep(Duration::from_secs(31)).await;
    assert!(storage.is_empty(), "tick at 60s swept the stale session");
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().is_none());

    sweep.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_sweep_keeps_live_session() {
    let (store, storage, clock) = fixture(SessionConfig::default());
    store
        .login(Principal::new("u1", Role::Admin))
        .unwrap();
    let sweep = ExpirySweep::for_store(&store);

    clock.advance(Duration::from_secs(30 * 60));
    tokio::time::sleep(Duration::from_secs(5 * 60)).await;

    assert_eq!(storage.len(), 2);
    assert!(sweep.is_running());
    sweep.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_sweep_runs_immediately_on_start() {
    let (store, storage, clock) = fixture(SessionConfig::default());
    store
        .login_for(Principal::new("u1", Role::Scorer), Duration::from_secs(1))
        .unwrap();
    clock.advance(Duration::from_secs(2));

    let sweep = ExpirySweep::spawn(store.clone(), Duration::from_secs(60));
    settle().await;

    assert!(storage.is_empty());
    sweep.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_sweeping() {
    let (store, storage, clock) = fixture(SessionConfig {
        sweep_interval: Duration::from_secs(10),
        ..SessionConfig::default()
    });
    let sweep = ExpirySweep::for_store(&store);
    settle().await;
    store
        .login_for(Principal::new("u1", Role::Captain), Duration::from_secs(5))
        .unwrap();

    sweep.shutdown().await;
    clock.advance(Duration::from_secs(6));
    tokio::time::sleep(Duration::from_secs(60)).await;

    // Only the lazy read check can clear it now.
    assert_eq!(storage.len(), 2);
    assert!(store.current_principal().is_none());
    assert!(storage.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_drop_stops_sweeping() {
    let (store, storage, clock) = fixture(SessionConfig::default());
    let sweep = ExpirySweep::spawn(store.clone(), Duration::from_secs(60));
    settle().await;
    store
        .login_for(Principal::new("u1", Role::Captain), Duration::from_secs(5))
        .unwrap();

    drop(sweep);
    clock.advance(Duration::from_secs(6));
    tokio::time::sleep(Duration::from_secs(120)).await;

    assert_eq!(storage.len(), 2);
}
