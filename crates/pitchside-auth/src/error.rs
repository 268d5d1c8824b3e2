//! Error types for the login flow.

use pitchside_session::SessionError;

/// Why a sign-in attempt failed.
///
/// None of these are retried automatically. The variants exist so the
/// login page can show a message the user can act on: a wrong password
/// needs a different password, an unreachable server needs patience.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The API answered and said no. `message` is the server's own
    /// reason, shown to the user as-is.
    #[error("login rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request never got an answer: DNS, refused connection, TLS,
    /// timeout.
    #[error("authentication server unreachable: {0}")]
    Unreachable(String),

    /// The API answered with a success status but the body isn't a
    /// principal.
    #[error("malformed login response: {0}")]
    MalformedResponse(String),

    /// The HTTP client could not be built from the given settings.
    #[error("invalid gateway configuration: {0}")]
    Configuration(String),

    /// The API's principal was accepted over the wire but the session
    /// store refused it (e.g. blank id).
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl AuthError {
    /// Text for the login page.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Unreachable(_) => {
                "Could not reach the server. Check your connection and try again."
                    .to_string()
            }
            Self::MalformedResponse(_) | Self::Session(_) => {
                "The server sent an unexpected response. Please try again later."
                    .to_string()
            }
            Self::Configuration(_) => {
                "Sign-in is not configured correctly.".to_string()
            }
        }
    }

    /// `true` for a server-side "no", as opposed to a technical failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
