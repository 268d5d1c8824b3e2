//! The login seam.
//!
//! Production uses [`HttpAuthGateway`](crate::HttpAuthGateway); tests and
//! demos plug in anything that turns credentials into a principal.

use pitchside_protocol::{Credentials, Principal};

use crate::AuthError;

/// Exchanges login credentials for the principal the API vouches for.
///
/// `Send + Sync + 'static` so a gateway can sit inside a long-lived
/// console and be called from any task.
///
/// # Example
///
/// ```rust
/// use pitchside_auth::{AuthError, AuthGateway};
/// use pitchside_protocol::{Credentials, Principal};
///
/// /// Accepts one hard-coded account. Only for demos.
/// struct DemoGateway;
///
/// impl AuthGateway for DemoGateway {
///     async fn login(
///         &self,
///         credentials: &Credentials,
///     ) -> Result<Principal, AuthError> {
///         if credentials.password != "demo" {
///             return Err(AuthError::Rejected {
///                 status: 401,
///                 message: "Invalid password".into(),
///             });
///         }
///         Ok(Principal::new("demo", credentials.role))
///     }
/// }
/// ```
pub trait AuthGateway: Send + Sync + 'static {
    /// Submits `credentials` to the authentication endpoint.
    ///
    /// # Returns
    /// - `Ok(Principal)` — the API accepted the login
    /// - `Err(AuthError::Rejected)` — the API refused, with its reason
    /// - `Err(AuthError::Unreachable)` / `MalformedResponse` — technical
    ///   failure
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl std::future::Future<Output = Result<Principal, AuthError>> + Send;
}
