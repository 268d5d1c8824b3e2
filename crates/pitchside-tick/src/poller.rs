//! Background refresh loops with an owner-controlled lifetime.
//!
//! A [`Poller`] is what a view holds while it is mounted: it runs a
//! refresh right away, then once per interval, until the handle is shut
//! down or dropped. Dropping the handle is the "unmount" path, so a torn
//! down view can never leave a timer behind.

use std::future::Future;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::{TickConfig, millis};

/// Handle to a running refresh loop.
///
/// ```ignore
/// let poller = Poller::spawn("live-match", TickConfig::every(LIVE_MATCH_INTERVAL), move || {
///     let api = api.clone();
///     async move { api.refresh_live_matches().await; }
/// });
/// // ... view is torn down:
/// poller.shutdown().await;
/// ```
pub struct Poller {
    name: String,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Poller {
    /// Spawns the loop on the current Tokio runtime.
    ///
    /// `refresh` is called once immediately and then once per interval.
    /// A refresh that overruns its interval is followed by the next one
    /// straight away, then the loop falls back onto the regular cadence.
    /// A shutdown request also cancels a refresh that is still in flight.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime, like `tokio::spawn`.
    pub fn spawn<F, Fut>(
        name: impl Into<String>,
        config: TickConfig,
        mut refresh: F,
    ) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let name = name.into();
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let config = config.validated();
        let task_name = name.clone();

        let task = tokio::spawn(async move {
            let mut ticker = config.interval.map(|period| {
                let first = Instant::now() + config.sample_jitter() + period;
                let mut ticker = time::interval_at(first, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                ticker
            });
            tracing::debug!(
                poller = %task_name,
                interval_ms = config.interval.map(millis),
                "poller started"
            );

            let mut runs = 0u64;
            loop {
                let started = Instant::now();
                // `biased` makes a pending shutdown win over more work.
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    () = refresh() => runs += 1,
                }
                if let Some(period) = config.interval {
                    let took = started.elapsed();
                    if took >= period {
                        tracing::warn!(
                            poller = %task_name,
                            took_ms = millis(took),
                            interval_ms = millis(period),
                            "refresh took longer than its interval"
                        );
                    }
                }
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    () = next_tick(ticker.as_mut()) => {}
                }
            }
            tracing::debug!(poller = %task_name, runs, "poller stopped");
        });

        Self {
            name,
            stop: Some(stop_tx),
            task: Some(task),
        }
    }

    /// The name given at spawn time, used in log lines.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` once the loop has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stops the loop and waits for it to exit.
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if e.is_panic() {
                    tracing::error!(poller = %self.name, "poller task panicked");
                }
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        // Shut down without waiting; `abort` covers a refresh that
        // ignores cancellation points.
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Waits for the next tick, or forever when repeating is disabled.
async fn next_tick(ticker: Option<&mut Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use super::*;

    fn counting_poller(interval: Duration) -> (Poller, Arc<AtomicU32>) {
        let count = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&count);
        let poller = Poller::spawn("test", TickConfig::every(interval), move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        (poller, count)
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_runs_refresh_immediately() {
        let (poller, count) = counting_poller(Duration::from_secs(30));

        tokio::time::sleep(Duration::from_millis(1)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
        poller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_refreshes_every_interval() {
        let (poller, count) = counting_poller(Duration::from_secs(30));

        // t=0 (immediate), 30, 60, 90
        tokio::time::sleep(Duration::from_secs(95)).await;

        assert_eq!(count.load(Ordering::SeqCst), 4);
        poller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_further_refreshes() {
        let (poller, count) = counting_poller(Duration::from_secs(5));
        tokio::time::sleep(Duration::from_secs(12)).await;
        let before = count.load(Ordering::SeqCst);

        poller.shutdown().await;
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(count.load(Ordering::SeqCst), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_loop() {
        let (poller, count) = counting_poller(Duration::from_secs(5));
        tokio::time::sleep(Duration::from_secs(1)).await;

        drop(poller);
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_in_flight_refresh() {
        let finished = Arc::new(AtomicU32::new(0));
        let flag = Arc::clone(&finished);
        let poller = Poller::spawn(
            "slow",
            TickConfig::every(Duration::from_secs(30)),
            move || {
                let flag = Arc::clone(&flag);
                async move {
                    tokio::time::sleep(Duration::from_secs(10)).await;
                    flag.fetch_add(1, Ordering::SeqCst);
                }
            },
        );
        tokio::time::sleep(Duration::from_secs(1)).await;

        poller.shutdown().await;
        tokio::time::sleep(Duration::from_secs(20)).await;

        assert_eq!(finished.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_is_finished_after_shutdown_request() {
        let (mut poller, _count) = counting_poller(Duration::from_secs(30));
        assert!(!poller.is_finished());
        assert_eq!(poller.name(), "test");

        if let Some(stop) = poller.stop.take() {
            let _ = stop.send(());
        }
        for _ in 0..100 {
            if poller.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }

        assert!(poller.is_finished());
    }
}
