//! Client-side session management for Pitchside.
//!
//! This crate answers one question for the rest of the console: "who is
//! signed in on this tab, and until when?"
//!
//! 1. **Store** — [`SessionStore`] holds at most one [`Principal`] and its
//!    expiry, mirrors both into [`TabStorage`] so a reload keeps the
//!    session, and notifies subscribers on every change.
//! 2. **Expiry** — stale sessions are never handed out: reads check the
//!    expiry lazily, and [`ExpirySweep`] clears them proactively on a
//!    timer so an idle tab stops showing signed-in UI.
//! 3. **Time and storage** are injected ([`Clock`], [`TabStorage`]) so
//!    tests can run on simulated time.
//!
//! # How it fits in the stack
//!
//! ```text
//! Router / Console (above)  ← reads current_principal() to gate views
//!     ↕
//! Session Layer (this crate)  ← caches the login result with an expiry
//!     ↕
//! Protocol Layer (below)  ← provides Principal, JsonCodec
//! ```
//!
//! The session is a UI convenience. The tournament API still checks
//! every request on its own.
//!
//! [`Principal`]: pitchside_protocol::Principal

mod clock;
mod error;
mod session;
mod storage;
mod store;
mod sweep;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::SessionError;
pub use session::{Session, SessionConfig};
pub use storage::{EXPIRY_KEY, MemoryStorage, PRINCIPAL_KEY, TabStorage};
pub use store::SessionStore;
pub use sweep::ExpirySweep;
