//! Shared vocabulary for Pitchside.
//!
//! Every other crate in the workspace talks in these terms:
//!
//! - **Types** ([`Principal`], [`Role`], [`Credentials`], etc.) — the
//!   records that travel to and from the tournament API and that get
//!   cached in tab storage.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those records are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding or when parsing a role tag.
//!
//! # Architecture
//!
//! ```text
//! Auth gateway (HTTP) ─┐
//!                      ├─→ Protocol (Principal, Codec) ←─ Router (role checks)
//! Session store ───────┘
//! ```
//!
//! Nothing in here does I/O. It only knows what a principal looks like
//! and how to serialize it.

mod codec;
mod error;
mod types;

// `pub use` lets callers write `pitchside_protocol::Principal` instead of
// reaching into the private `types` module.

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{Credentials, LoginRejection, Principal, PrincipalId, Role};
