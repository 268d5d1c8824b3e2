//! The session store: the tab's single source of truth for "who is signed
//! in, and until when".
//!
//! # Concurrency note
//!
//! `SessionStore` is a cheap handle (`Arc` inside) that is cloned into
//! every consumer instead of living in a global. All mutation goes
//! through one mutex, and storage writes plus subscriber notification
//! happen while that lock is held, so `login`, `logout` and the expiry
//! sweep can never observe each other half-done. The lock is never held
//! across an `.await`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use pitchside_protocol::{Codec, JsonCodec, Principal};
use tokio::sync::watch;

use crate::clock::duration_ms;
use crate::{
    Clock, EXPIRY_KEY, PRINCIPAL_KEY, Session, SessionConfig, SessionError,
    TabStorage,
};

/// Holds at most one [`Session`] and mirrors it into [`TabStorage`].
///
/// ## Lifecycle
///
/// ```text
/// open() ──hydrate──→ [Empty] ──login()──→ [Active] ──logout()──→ [Empty]
///                        ↑                    │
///                        └──expiry (read or sweep)
/// ```
///
/// A re-login while active replaces the principal and its expiry in one
/// step; nothing from the earlier session survives.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    session: Mutex<Option<Session>>,
    storage: Box<dyn TabStorage>,
    clock: Box<dyn Clock>,
    codec: JsonCodec,
    config: SessionConfig,
    /// Current principal as seen by subscribers. Updated under the
    /// `session` lock, before the mutating call returns.
    changes: watch::Sender<Option<Principal>>,
}

impl SessionStore {
    /// Opens a store over `storage`, restoring a session that survived a
    /// reload.
    ///
    /// A stored session that is expired, incomplete, or unreadable is
    /// removed from storage and the store starts empty. This never fails.
    pub fn open(
        config: SessionConfig,
        storage: impl TabStorage,
        clock: impl Clock,
    ) -> Self {
        let codec = JsonCodec;
        let session = hydrate(&storage, &clock, &codec);
        let (changes, _) =
            watch::channel(session.as_ref().map(|s| s.principal.clone()));

        Self {
            inner: Arc::new(StoreInner {
                session: Mutex::new(session),
                storage: Box::new(storage),
                clock: Box::new(clock),
                codec,
                config,
                changes,
            }),
        }
    }

    /// Starts a session for `principal` with the configured default
    /// duration (one hour unless overridden).
    ///
    /// # Errors
    /// See [`login_for`](Self::login_for).
    pub fn login(&self, principal: Principal) -> Result<Session, SessionError> {
        self.login_for(principal, self.inner.config.session_duration)
    }

    /// Starts a session for `principal` that expires `duration` from now.
    ///
    /// Overwrites any existing session, persists both storage entries and
    /// notifies subscribers before returning.
    ///
    /// # Errors
    /// - [`SessionError::InvalidPrincipal`] — the principal has a blank id
    /// - [`SessionError::InvalidDuration`] — `duration` is zero
    /// - [`SessionError::Codec`] — the principal could not be encoded
    ///
    /// On error the store is left exactly as it was.
    pub fn login_for(
        &self,
        principal: Principal,
        duration: Duration,
    ) -> Result<Session, SessionError> {
        if principal.id.is_blank() {
            return Err(SessionError::InvalidPrincipal(
                "principal id is blank".into(),
            ));
        }
        if duration.is_zero() {
            return Err(SessionError::InvalidDuration);
        }
        let encoded = self.inner.codec.encode_text(&principal)?;

        let mut slot = self.inner.session.lock();
        let now = self.inner.clock.now_ms();
        let ttl_ms = duration_ms(duration);
        let session = Session {
            principal,
            expires_at_ms: now.saturating_add(ttl_ms),
        };

        self.inner.storage.set(PRINCIPAL_KEY, encoded);
        self.inner
            .storage
            .set(EXPIRY_KEY, session.expires_at_ms.to_string());
        let replaced = slot.replace(session.clone());
        self.inner
            .changes
            .send_replace(Some(session.principal.clone()));

        tracing::info!(
            principal_id = %session.principal.id,
            role = %session.principal.role,
            expires_at_ms = session.expires_at_ms,
            replaced = replaced.is_some(),
            "session started"
        );
        Ok(session)
    }

    /// Ends the current session.
    ///
    /// Idempotent: with no session this only makes sure storage is clean,
    /// and subscribers hear nothing.
    pub fn logout(&self) {
        let mut slot = self.inner.session.lock();
        let previous = slot.take();
        self.clear_storage();

        if let Some(previous) = previous {
            self.inner.changes.send_replace(None);
            tracing::info!(
                principal_id = %previous.principal.id,
                "session ended"
            );
        }
    }

    /// The signed-in principal, or `None`.
    ///
    /// A session past its expiry is cleared on the spot (and subscribers
    /// notified) rather than returned, even if the sweep hasn't run yet.
    pub fn current_principal(&self) -> Option<Principal> {
        self.session().map(|s| s.principal)
    }

    /// The full live session, with the same expiry check as
    /// [`current_principal`](Self::current_principal).
    pub fn session(&self) -> Option<Session> {
        let mut slot = self.inner.session.lock();
        self.expire_if_stale(&mut slot);
        slot.clone()
    }

    /// Expiry instant of the live session, in epoch milliseconds.
    pub fn expires_at_ms(&self) -> Option<u64> {
        self.session().map(|s| s.expires_at_ms)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    /// Clears the session if it has expired. Returns `true` when it did.
    ///
    /// This is what the background [`ExpirySweep`](crate::ExpirySweep)
    /// calls; it is safe to call at any time.
    pub fn sweep(&self) -> bool {
        let mut slot = self.inner.session.lock();
        self.expire_if_stale(&mut slot)
    }

    /// Subscribes to principal changes.
    ///
    /// The receiver's value is updated before `login`/`logout` return,
    /// so a consumer that checks `has_changed()` or awaits `changed()`
    /// after the call always sees the new identity.
    pub fn subscribe(&self) -> watch::Receiver<Option<Principal>> {
        self.inner.changes.subscribe()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Milliseconds since the epoch according to the store's clock.
    pub fn now_ms(&self) -> u64 {
        self.inner.clock.now_ms()
    }

    fn expire_if_stale(&self, slot: &mut Option<Session>) -> bool {
        let now = self.inner.clock.now_ms();
        if !slot.as_ref().is_some_and(|s| s.is_expired_at(now)) {
            return false;
        }
        if let Some(stale) = slot.take() {
            tracing::info!(
                principal_id = %stale.principal.id,
                expired_at_ms = stale.expires_at_ms,
                now_ms = now,
                "session expired"
            );
        }
        self.clear_storage();
        self.inner.changes.send_replace(None);
        true
    }

    fn clear_storage(&self) {
        self.inner.storage.remove(PRINCIPAL_KEY);
        self.inner.storage.remove(EXPIRY_KEY);
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.inner.session.lock();
        f.debug_struct("SessionStore")
            .field("session", &*slot)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Hydration
// ---------------------------------------------------------------------------

/// Restores a session left in storage by an earlier store on this tab.
fn hydrate(
    storage: &impl TabStorage,
    clock: &impl Clock,
    codec: &JsonCodec,
) -> Option<Session> {
    let raw_principal = storage.get(PRINCIPAL_KEY);
    let raw_expiry = storage.get(EXPIRY_KEY);
    if raw_principal.is_none() && raw_expiry.is_none() {
        return None;
    }

    let restored =
        restore(codec, raw_principal.as_deref(), raw_expiry.as_deref());
    let now = clock.now_ms();

    match restored {
        Ok(session) if !session.is_expired_at(now) => {
            tracing::debug!(
                principal_id = %session.principal.id,
                expires_at_ms = session.expires_at_ms,
                "session restored from storage"
            );
            Some(session)
        }
        Ok(session) => {
            tracing::info!(
                principal_id = %session.principal.id,
                expired_at_ms = session.expires_at_ms,
                "discarding expired stored session"
            );
            discard(storage);
            None
        }
        Err(reason) => {
            tracing::warn!(%reason, "discarding unreadable stored session");
            discard(storage);
            None
        }
    }
}

fn discard(storage: &impl TabStorage) {
    storage.remove(PRINCIPAL_KEY);
    storage.remove(EXPIRY_KEY);
}

fn restore(
    codec: &JsonCodec,
    raw_principal: Option<&str>,
    raw_expiry: Option<&str>,
) -> Result<Session, String> {
    let (Some(raw_principal), Some(raw_expiry)) = (raw_principal, raw_expiry)
    else {
        return Err("only one of the two session entries is present".into());
    };

    let principal: Principal = codec
        .decode(raw_principal.as_bytes())
        .map_err(|e| e.to_string())?;
    if principal.id.is_blank() {
        return Err("stored principal has a blank id".into());
    }
    let expires_at_ms = raw_expiry
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("bad expiry {raw_expiry:?}: {e}"))?;

    Ok(Session {
        principal,
        expires_at_ms,
    })
}

// =========================================================================
// Tests
// =========================================================================
