//! Unified error type for Pitchside.

use pitchside_auth::AuthError;
use pitchside_protocol::ProtocolError;
use pitchside_router::RouteError;
use pitchside_session::SessionError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant lets `?` convert sub-crate
/// errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum PitchsideError {
    /// Encode/decode of a principal or payload.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The session store refused a login.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Sign-in failed: rejected, unreachable, or a bad response.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A path that matches no route.
    #[error(transparent)]
    Route(#[from] RouteError),

    /// A configuration value is missing or unparsable.
    #[error("invalid configuration: {0}")]
    Config(String),
}
