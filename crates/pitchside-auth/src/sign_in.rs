//! The login flow: ask the API, then remember the answer.

use pitchside_protocol::{Credentials, Principal};
use pitchside_session::SessionStore;

use crate::{AuthError, AuthGateway};

/// Submits `credentials` through `gateway` and, if the API accepts them,
/// starts a session in `store` for the returned principal.
///
/// On any error the store is left exactly as it was: a failed attempt
/// neither signs anyone in nor signs the current principal out.
///
/// # Errors
/// Whatever the gateway returned, or [`AuthError::Session`] if the store
/// refused the principal.
pub async fn sign_in<G>(
    gateway: &G,
    store: &SessionStore,
    credentials: &Credentials,
) -> Result<Principal, AuthError>
where
    G: AuthGateway,
{
    let principal = gateway.login(credentials).await?;
    let session = store.login(principal)?;
    tracing::info!(
        principal = %session.principal.id,
        role = %session.principal.role,
        expires_at_ms = session.expires_at_ms,
        "signed in"
    );
    Ok(session.principal)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use pitchside_protocol::Role;
    use pitchside_session::{ManualClock, MemoryStorage, SessionConfig};

    use super::*;

    const T0: u64 = 1_700_000_000_000;

    /// Accepts one password, counts calls.
    struct FakeGateway {
        password: &'static str,
        principal: Principal,
        calls: AtomicU32,
    }

    impl FakeGateway {
        fn new(principal: Principal) -> Self {
            Self {
                password: "secret",
                principal,
                calls: AtomicU32::new(0),
            }
        }
    }

    impl AuthGateway for FakeGateway {
        async fn login(
            &self,
            credentials: &Credentials,
        ) -> Result<Principal, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if credentials.password == self.password {
                Ok(self.principal.clone())
            } else {
                Err(AuthError::Rejected {
                    status: 401,
                    message: "Invalid password".into(),
                })
            }
        }
    }

    fn store() -> SessionStore {
        SessionStore::open(
            SessionConfig::default(),
            MemoryStorage::new(),
            ManualClock::new(T0),
        )
    }

    #[tokio::test]
    async fn test_sign_in_success_starts_session() {
        let gw = FakeGateway::new(Principal::new("u7", Role::Captain));
        let store = store();
        let creds = Credentials::new("cap@club.test", "secret", Role::Captain);

        let principal = sign_in(&gw, &store, &creds).await.unwrap();

        assert_eq!(principal.id.as_str(), "u7");
        assert_eq!(store.current_principal(), Some(principal));
        assert_eq!(store.expires_at_ms(), Some(T0 + 3_600_000));
    }

    #[tokio::test]
    async fn test_sign_in_rejected_leaves_store_empty() {
        let gw = FakeGateway::new(Principal::new("u7", Role::Captain));
        let store = store();
        let creds = Credentials::new("cap@club.test", "wrong", Role::Captain);

        let err = sign_in(&gw, &store, &creds).await.unwrap_err();

        assert!(err.is_rejection());
        assert_eq!(err.user_message(), "Invalid password");
        assert!(store.current_principal().is_none());
        assert_eq!(gw.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_sign_in_rejected_keeps_existing_session() {
        let gw = FakeGateway::new(Principal::new("u7", Role::Captain));
        let store = store();
        let existing = Principal::new("u1", Role::Admin);
        store.login(existing.clone()).unwrap();

        let creds = Credentials::new("cap@club.test", "wrong", Role::Captain);
        assert!(sign_in(&gw, &store, &creds).await.is_err());

        assert_eq!(store.current_principal(), Some(existing));
    }

    #[tokio::test]
    async fn test_sign_in_blank_principal_is_session_error() {
        let gw = FakeGateway::new(Principal::new("  ", Role::Scorer));
        let store = store();
        let creds = Credentials::new("s@club.test", "secret", Role::Scorer);

        let err = sign_in(&gw, &store, &creds).await.unwrap_err();

        assert!(matches!(err, AuthError::Session(_)));
        assert!(store.current_principal().is_none());
    }
}
