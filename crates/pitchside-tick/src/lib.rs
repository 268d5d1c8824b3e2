//! Timed refresh for Pitchside.
//!
//! Two things in the console run on a timer: the session expiry sweep
//! (once a minute) and the views that re-fetch live data (the live match
//! page every 30 s, the commentary feed every 5 s). Both are a [`Poller`]:
//! a refresh loop whose lifetime is tied to a handle.
//!
//! Timing is a plain `tokio::time::Interval` with
//! [`MissedTickBehavior::Skip`](tokio::time::MissedTickBehavior::Skip): a
//! refresh that runs long never causes a burst of catch-up refreshes.
//!
//! # Disabled mode
//!
//! When [`TickConfig::interval`] is `None`, a poller runs its refresh
//! once on start and then only waits for shutdown.

mod poller;

pub use poller::Poller;

use std::time::Duration;

use rand::Rng;
use tracing::warn;

/// Refresh cadence of the live match view.
pub const LIVE_MATCH_INTERVAL: Duration = Duration::from_secs(30);

/// Refresh cadence of the live commentary feed.
pub const COMMENTARY_INTERVAL: Duration = Duration::from_secs(5);

/// When a [`Poller`] refreshes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickConfig {
    /// Time between refreshes. `None` disables repeating.
    pub interval: Option<Duration>,
    /// Random delay (0..max) added before the *first* repeat so that many
    /// pollers created at the same instant don't all hit the API together.
    pub initial_jitter: Duration,
}

impl TickConfig {
    /// Shortest interval accepted. Anything faster would hammer the API.
    pub const MIN_INTERVAL: Duration = Duration::from_millis(100);

    /// Refresh every `interval`.
    pub fn every(interval: Duration) -> Self {
        Self {
            interval: Some(interval),
            initial_jitter: Duration::ZERO,
        }
    }

    /// Adds first-repeat jitter of up to `max`.
    pub fn with_jitter(mut self, max: Duration) -> Self {
        self.initial_jitter = max;
        self
    }

    /// A zero interval disables repeating; anything below
    /// [`Self::MIN_INTERVAL`] is raised to it.
    pub fn validated(mut self) -> Self {
        match self.interval {
            Some(d) if d.is_zero() => {
                warn!("zero refresh interval, repeating disabled");
                self.interval = None;
            }
            Some(d) if d < Self::MIN_INTERVAL => {
                warn!(
                    interval_ms = millis(d),
                    min_ms = millis(Self::MIN_INTERVAL),
                    "refresh interval below minimum, clamped"
                );
                self.interval = Some(Self::MIN_INTERVAL);
            }
            _ => {}
        }
        self
    }

    /// A random delay in `0..initial_jitter`.
    pub fn sample_jitter(&self) -> Duration {
        let max_us = u64::try_from(self.initial_jitter.as_micros())
            .unwrap_or(u64::MAX);
        if max_us == 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(rand::rng().random_range(0..max_us))
    }
}

/// Milliseconds for log fields, saturating instead of truncating.
pub(crate) fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_disabled() {
        let cfg = TickConfig::default();
        assert_eq!(cfg.interval, None);
        assert_eq!(cfg.initial_jitter, Duration::ZERO);
    }

    #[test]
    fn test_validated_clamps_tiny_interval() {
        let cfg = TickConfig::every(Duration::from_millis(5)).validated();
        assert_eq!(cfg.interval, Some(TickConfig::MIN_INTERVAL));
    }

    #[test]
    fn test_validated_zero_interval_disables() {
        let cfg = TickConfig::every(Duration::ZERO).validated();
        assert_eq!(cfg.interval, None);
    }

    #[test]
    fn test_validated_keeps_view_cadences() {
        for interval in [COMMENTARY_INTERVAL, LIVE_MATCH_INTERVAL] {
            let cfg = TickConfig::every(interval).validated();
            assert_eq!(cfg.interval, Some(interval));
        }
    }

    #[test]
    fn test_sample_jitter_stays_below_bound() {
        let cfg = TickConfig::every(LIVE_MATCH_INTERVAL)
            .with_jitter(Duration::from_millis(250));
        for _ in 0..100 {
            assert!(cfg.sample_jitter() < Duration::from_millis(250));
        }
    }

    #[test]
    fn test_sample_jitter_without_bound_is_zero() {
        let cfg = TickConfig::every(LIVE_MATCH_INTERVAL);
        assert_eq!(cfg.sample_jitter(), Duration::ZERO);
    }

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }
}
