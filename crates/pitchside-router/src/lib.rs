//! Routing for the Pitchside console.
//!
//! Decides, for a requested view and the current principal, whether the
//! view renders or the user is sent somewhere else. The session store is
//! not a dependency: callers pass `Option<&Principal>` in, which keeps
//! every decision a pure function of its inputs.
//!
//! # Key types
//!
//! - [`Route`] — every view the console knows, parsed from a path
//! - [`RouteGuard`] — "may this principal see it?", with
//!   [`PresenceGate`], [`RoleGate`] and [`GuestGate`]
//! - [`Navigator`] — remembers where a redirected user wanted to go
//! - [`sidebar_links`] / [`home_variant`] — role-dependent dashboard chrome

mod error;
mod guard;
mod menu;
mod nav;
mod route;

pub use error::RouteError;
pub use guard::{Access, GuardDecision, GuestGate, PresenceGate, RoleGate, RouteGuard};
pub use menu::{HomeVariant, SidebarLink, home_variant, sidebar_links};
pub use nav::{Navigation, Navigator};
pub use route::Route;
