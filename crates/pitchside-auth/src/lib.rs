//! Login client for Pitchside.
//!
//! The console doesn't decide who may sign in; the tournament API does.
//! This crate forwards the login form to the API and, only when the API
//! accepts it, hands the returned principal to the session store.
//!
//! - [`AuthGateway`] — the seam: "credentials in, principal out"
//! - [`HttpAuthGateway`] — the real thing, `POST {api}/auth/login`
//! - [`sign_in`] — gateway call + session store update
//! - [`AuthError`] — rejection vs. unreachable vs. garbage, kept apart so
//!   the login page can tell the user which one happened

#![allow(async_fn_in_trait)]

mod error;
mod gateway;
mod http;
mod sign_in;

pub use error::AuthError;
pub use gateway::AuthGateway;
pub use http::HttpAuthGateway;
pub use sign_in::sign_in;
