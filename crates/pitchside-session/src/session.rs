//! Session types: the cached login result and its configuration.

use std::time::Duration;

use pitchside_protocol::Principal;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for session behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long a login stays valid when no explicit duration is given.
    ///
    /// Default: one hour.
    pub session_duration: Duration,

    /// How often the background sweep checks for an expired session.
    ///
    /// Default: one minute.
    pub sweep_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_duration: Duration::from_secs(60 * 60),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One principal paired with the instant its session stops being valid.
///
/// There is no "expired" state: an expired session is removed from the
/// store, so a `Session` you can see is either live or about to be swept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Who signed in.
    pub principal: Principal,

    /// Epoch milliseconds. The session is invalid strictly after this.
    pub expires_at_ms: u64,
}

impl Session {
    /// Whether the session is past its expiry at `now_ms`.
    ///
    /// Exactly at `expires_at_ms` the session is still valid.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms > self.expires_at_ms
    }

    /// Milliseconds left at `now_ms` (zero once expired).
    pub fn remaining_at(&self, now_ms: u64) -> Duration {
        Duration::from_millis(self.expires_at_ms.saturating_sub(now_ms))
    }
}
