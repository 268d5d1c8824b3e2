//! HTTP implementation of [`AuthGateway`].

use std::time::Duration;

use pitchside_protocol::{Codec, Credentials, JsonCodec, LoginRejection, Principal};
use reqwest::StatusCode;

use crate::{AuthError, AuthGateway};

/// Talks to `POST {base_url}/auth/login`.
///
/// The request body is `{"email", "password", "role"}`. A 2xx response
/// body is decoded as the [`Principal`]; anything else becomes
/// [`AuthError::Rejected`] carrying the server's `message` field, or the
/// status text when the body has none.
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    client: reqwest::Client,
    login_url: String,
    codec: JsonCodec,
}

impl HttpAuthGateway {
    /// How long a login request may take before it counts as unreachable.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Builds a gateway for the API at `base_url` with the default timeout.
    ///
    /// # Errors
    /// [`AuthError::Configuration`] if `base_url` is blank or the HTTP
    /// client can't be built.
    pub fn new(base_url: &str) -> Result<Self, AuthError> {
        Self::with_timeout(base_url, Self::DEFAULT_TIMEOUT)
    }

    /// Same as [`new`](Self::new) with an explicit request timeout.
    pub fn with_timeout(
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Configuration(e.to_string()))?;
        Self::with_client(client, base_url)
    }

    /// Wraps an already-configured client (shared connection pool,
    /// custom TLS roots, ...).
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
    ) -> Result<Self, AuthError> {
        let base = base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(AuthError::Configuration(
                "API base URL is empty".into(),
            ));
        }
        Ok(Self {
            client,
            login_url: format!("{base}/auth/login"),
            codec: JsonCodec,
        })
    }

    /// The full URL login requests are posted to.
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    fn rejection(&self, status: StatusCode, body: &[u8]) -> AuthError {
        let message = self
            .codec
            .decode::<LoginRejection>(body)
            .ok()
            .and_then(|r| r.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                status.canonical_reason().unwrap_or("Login failed").to_string()
            });
        AuthError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}

impl AuthGateway for HttpAuthGateway {
    async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<Principal, AuthError> {
        tracing::debug!(
            url = %self.login_url,
            email = %credentials.email,
            role = %credentials.role,
            "submitting login"
        );

        let response = self
            .client
            .post(&self.login_url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %self.login_url, error = %e, "login request failed");
                AuthError::Unreachable(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AuthError::Unreachable(e.to_string()))?;

        if !status.is_success() {
            let err = self.rejection(status, &body);
            tracing::info!(status = status.as_u16(), error = %err, "login rejected");
            return Err(err);
        }

        let principal: Principal = self.codec.decode(&body).map_err(|e| {
            tracing::warn!(error = %e, "login response is not a principal");
            AuthError::MalformedResponse(e.to_string())
        })?;

        if principal.role != credentials.role {
            // The server's answer wins; the form's role was only a hint.
            tracing::warn!(
                requested = %credentials.role,
                granted = %principal.role,
                "login granted a different role than requested"
            );
        }
        Ok(principal)
    }
}
