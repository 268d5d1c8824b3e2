//! Error types for the session layer.

use pitchside_protocol::ProtocolError;

/// Errors returned by [`SessionStore::login`](crate::SessionStore::login).
///
/// Expiry is not an error: a stale session simply reads as "no session".
/// Broken storage on startup isn't one either; the store starts empty.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The principal can't be cached, e.g. it has a blank id.
    #[error("invalid principal: {0}")]
    InvalidPrincipal(String),

    /// A session must last longer than zero milliseconds.
    #[error("session duration must be greater than zero")]
    InvalidDuration,

    /// The principal could not be encoded for tab storage.
    #[error("could not persist session: {0}")]
    Codec(#[from] ProtocolError),
}
