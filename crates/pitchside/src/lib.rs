//! # Pitchside
//!
//! Client-side core of a football tournament management console: who is
//! signed in, which views they may open, and how they sign in.
//!
//! The layers are separate crates, re-exported here:
//!
//! - `pitchside-protocol` — principals, roles, credentials, codec
//! - `pitchside-session` — the expiring session store and its sweep
//! - `pitchside-auth` — the login gateway
//! - `pitchside-router` — routes, gates, navigation
//! - `pitchside-tick` — interval scheduling and view pollers
//!
//! [`Console`] ties them together for one tab.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pitchside::prelude::*;
//!
//! # async fn run() -> Result<(), PitchsideError> {
//! let config = ConsoleConfig::from_env()?;
//! let mut console = ConsoleBuilder::new().config(config).build_http()?;
//!
//! let creds = Credentials::new("cap@club.test", "secret", Role::Captain);
//! let landed = console.sign_in(&creds).await?;
//! println!("signed in, now on {landed}");
//!
//! console.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod logging;

pub use config::ConsoleConfig;
pub use console::{Console, ConsoleBuilder};
pub use error::PitchsideError;

pub use pitchside_auth as auth;
pub use pitchside_protocol as protocol;
pub use pitchside_router as router;
pub use pitchside_session as session;
pub use pitchside_tick as tick;

/// Everything a console front end usually needs.
pub mod prelude {
    pub use crate::{Console, ConsoleBuilder, ConsoleConfig, PitchsideError};
    pub use pitchside_auth::{AuthError, AuthGateway, HttpAuthGateway};
    pub use pitchside_protocol::{Credentials, Principal, PrincipalId, Role};
    pub use pitchside_router::{
        GuardDecision, HomeVariant, Navigation, Route, SidebarLink,
    };
    pub use pitchside_session::{SessionConfig, SessionStore};
    pub use pitchside_tick::{Poller, TickConfig};
}
