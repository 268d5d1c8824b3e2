//! Console configuration.
//!
//! Plain structs with defaults, loaded via the `config` crate from
//! `PITCHSIDE_*` environment variables.

use std::time::Duration;

use serde::Deserialize;

use pitchside_session::SessionConfig;

use crate::PitchsideError;

/// Prefix shared by every console variable.
pub const ENV_PREFIX: &str = "PITCHSIDE";

/// Base URL of the tournament API.
pub const API_URL_VAR: &str = "PITCHSIDE_API_URL";
/// Session length in minutes.
pub const SESSION_MINUTES_VAR: &str = "PITCHSIDE_SESSION_MINUTES";
/// Expiry sweep interval in seconds.
pub const SWEEP_SECS_VAR: &str = "PITCHSIDE_SWEEP_SECS";
/// Login request timeout in seconds.
pub const HTTP_TIMEOUT_SECS_VAR: &str = "PITCHSIDE_HTTP_TIMEOUT_SECS";

/// Everything a [`Console`](crate::Console) needs to start.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ConsoleSettings")]
pub struct ConsoleConfig {
    /// Base URL of the tournament API; login posts to
    /// `{api_base_url}/auth/login`.
    pub api_base_url: String,

    /// How long a login request may take.
    pub request_timeout: Duration,

    /// Session length and sweep cadence.
    pub session: SessionConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            request_timeout: Duration::from_secs(10),
            session: SessionConfig::default(),
        }
    }
}

/// The variables as they arrive, prefix stripped and lowercased.
///
/// Numbers stay text until [`positive`] checks them so the error can
/// name the variable.
#[derive(Debug, Default, Deserialize)]
struct ConsoleSettings {
    #[serde(default)]
    api_url: Option<String>,
    #[serde(default)]
    session_minutes: Option<String>,
    #[serde(default)]
    sweep_secs: Option<String>,
    #[serde(default)]
    http_timeout_secs: Option<String>,
}

impl TryFrom<ConsoleSettings> for ConsoleConfig {
    type Error = String;

    fn try_from(settings: ConsoleSettings) -> Result<Self, Self::Error> {
        let defaults = Self::default();

        let api_base_url = present(settings.api_url)
            .ok_or_else(|| format!("{API_URL_VAR} is not set"))?;

        let session_duration = match present(settings.session_minutes) {
            Some(v) => minutes(positive(SESSION_MINUTES_VAR, &v)?),
            None => defaults.session.session_duration,
        };
        let sweep_interval = match present(settings.sweep_secs) {
            Some(v) => Duration::from_secs(positive(SWEEP_SECS_VAR, &v)?),
            None => defaults.session.sweep_interval,
        };
        let request_timeout = match present(settings.http_timeout_secs) {
            Some(v) => Duration::from_secs(positive(HTTP_TIMEOUT_SECS_VAR, &v)?),
            None => defaults.request_timeout,
        };

        Ok(Self {
            api_base_url,
            request_timeout,
            session: SessionConfig {
                session_duration,
                sweep_interval,
            },
        })
    }
}

impl ConsoleConfig {
    /// Loads the configuration from process environment variables.
    ///
    /// `PITCHSIDE_API_URL` is required. `PITCHSIDE_SESSION_MINUTES`,
    /// `PITCHSIDE_SWEEP_SECS` and `PITCHSIDE_HTTP_TIMEOUT_SECS` are
    /// optional and fall back to the defaults.
    ///
    /// # Errors
    /// [`PitchsideError::Config`] when the URL is missing or a number
    /// doesn't parse as a positive integer.
    pub fn from_env() -> Result<Self, PitchsideError> {
        Self::load(environment())
    }

    /// Same as [`from_env`](Self::from_env) over the given variables
    /// instead of the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, PitchsideError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::load(environment().source(Some(vars)))
    }

    fn load(source: config::Environment) -> Result<Self, PitchsideError> {
        config::Config::builder()
            .add_source(source)
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .map_err(|e| PitchsideError::Config(e.to_string()))
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX).ignore_empty(true)
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn minutes(n: u64) -> Duration {
    Duration::from_secs(n.saturating_mul(60))
}

fn positive(key: &str, value: &str) -> Result<u64, String> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{key} must be a positive integer, got {value:?}")),
    }
}
