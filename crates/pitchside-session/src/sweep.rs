//! Background expiry sweep.
//!
//! Reads already refuse to return a stale session, but a tab nobody is
//! interacting with never reads. The sweep clears the session on a timer
//! so signed-in UI disappears on its own once the hour is up.

use std::time::Duration;

use pitchside_tick::{Poller, TickConfig};

use crate::SessionStore;
use crate::clock::duration_ms;

/// Owns the sweep task for one [`SessionStore`].
///
/// Shut it down (or drop it) when the store's owner is torn down; there
/// is no global timer to leak.
pub struct ExpirySweep {
    poller: Poller,
}

impl ExpirySweep {
    /// Starts sweeping `store` every `interval` (the store's
    /// `sweep_interval` is the usual choice). The first check runs
    /// immediately.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn spawn(store: SessionStore, interval: Duration) -> Self {
        tracing::debug!(
            interval_ms = duration_ms(interval),
            "starting expiry sweep"
        );
        let poller =
            Poller::spawn("expiry-sweep", TickConfig::every(interval), move || {
                let store = store.clone();
                async move {
                    if store.sweep() {
                        tracing::debug!("expiry sweep cleared a stale session");
                    }
                }
            });
        Self { poller }
    }

    /// Starts sweeping with the interval from the store's config.
    pub fn for_store(store: &SessionStore) -> Self {
        let interval = store.config().sweep_interval;
        Self::spawn(store.clone(), interval)
    }

    pub fn is_running(&self) -> bool {
        !self.poller.is_finished()
    }

    /// Stops the sweep and waits for its task to exit.
    pub async fn shutdown(self) {
        self.poller.shutdown().await;
        tracing::debug!("expiry sweep shut down");
    }
}
