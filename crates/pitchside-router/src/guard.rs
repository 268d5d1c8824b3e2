//! Access gates.
//!
//! A gate answers one question: given who is signed in (maybe nobody),
//! does the view render or does the user go somewhere else? Gates never
//! fail. "Not signed in" and "wrong role" both send the user to the login
//! page, on purpose; the UI doesn't tell a stranger which views exist.
//!
//! None of this is a security boundary. The API enforces permissions on
//! every request; these gates only keep the console from showing forms
//! the server will refuse.

use std::borrow::Cow;

use pitchside_protocol::{Principal, Role};

use crate::Route;

/// What a gate decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(Route),
}

impl GuardDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render)
    }
}

/// Decides whether a view may render for `principal`.
pub trait RouteGuard {
    fn check(&self, principal: Option<&Principal>) -> GuardDecision;
}

/// Renders for anyone signed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresenceGate;

impl RouteGuard for PresenceGate {
    fn check(&self, principal: Option<&Principal>) -> GuardDecision {
        match principal {
            Some(_) => GuardDecision::Render,
            None => GuardDecision::Redirect(Route::Login),
        }
    }
}

/// Renders for a signed-in principal whose role is on the allow-list.
///
/// Roles match exactly; there is no hierarchy, so `superadmin` does not
/// implicitly pass an `admin` gate.
#[derive(Debug, Clone)]
pub struct RoleGate {
    allowed: Cow<'static, [Role]>,
}

impl RoleGate {
    pub fn new(allowed: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed: Cow::Owned(allowed.into_iter().collect()),
        }
    }

    /// A gate over a fixed list, no allocation.
    pub const fn from_static(allowed: &'static [Role]) -> Self {
        Self {
            allowed: Cow::Borrowed(allowed),
        }
    }

    pub fn allowed(&self) -> &[Role] {
        &self.allowed
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }
}

impl RouteGuard for RoleGate {
    fn check(&self, principal: Option<&Principal>) -> GuardDecision {
        let Some(principal) = principal else {
            return GuardDecision::Redirect(Route::Login);
        };
        if self.allows(principal.role) {
            GuardDecision::Render
        } else {
            tracing::debug!(
                principal = %principal.id,
                role = %principal.role,
                allowed = ?self.allowed,
                "role gate denied"
            );
            GuardDecision::Redirect(Route::Login)
        }
    }
}

/// Renders only when nobody is signed in; a signed-in user asking for the
/// login page is sent to the dashboard instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuestGate;

impl RouteGuard for GuestGate {
    fn check(&self, principal: Option<&Principal>) -> GuardDecision {
        match principal {
            Some(_) => GuardDecision::Redirect(Route::Dashboard),
            None => GuardDecision::Render,
        }
    }
}

/// The gate a [`Route`] sits behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, signed in or not.
    Public,
    /// Only when signed out ([`GuestGate`]).
    Guest,
    /// Anyone signed in ([`PresenceGate`]).
    SignedIn,
    /// Signed in with one of these roles ([`RoleGate`]).
    Roles(&'static [Role]),
}

impl RouteGuard for Access {
    fn check(&self, principal: Option<&Principal>) -> GuardDecision {
        match *self {
            Self::Public => GuardDecision::Render,
            Self::Guest => GuestGate.check(principal),
            Self::SignedIn => PresenceGate.check(principal),
            Self::Roles(roles) => RoleGate::from_static(roles).check(principal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_role(role: Role) -> Principal {
        Principal::new("u1", role)
    }

    #[test]
    fn test_presence_gate_without_principal_redirects_to_login() {
        assert_eq!(
            PresenceGate.check(None),
            GuardDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn test_presence_gate_renders_for_any_role() {
        for role in Role::ALL {
            assert!(PresenceGate.check(Some(&as_role(role))).is_render());
        }
    }

    #[test]
    fn test_role_gate_admin_only() {
        let gate = RoleGate::new([Role::Admin]);

        assert_eq!(
            gate.check(Some(&as_role(Role::Captain))),
            GuardDecision::Redirect(Route::Login)
        );
        assert_eq!(gate.check(None), GuardDecision::Redirect(Route::Login));
        assert_eq!(gate.check(Some(&as_role(Role::Admin))), GuardDecision::Render);
    }

    #[test]
    fn test_role_gate_has_no_hierarchy() {
        let gate = RoleGate::from_static(&[Role::Admin]);
        assert!(!gate.check(Some(&as_role(Role::SuperAdmin))).is_render());
    }

    #[test]
    fn test_role_gate_multiple_roles() {
        let gate = RoleGate::new([Role::Admin, Role::Scorer]);

        assert!(gate.allows(Role::Scorer));
        assert!(gate.check(Some(&as_role(Role::Scorer))).is_render());
        assert!(!gate.check(Some(&as_role(Role::Captain))).is_render());
        assert_eq!(gate.allowed(), &[Role::Admin, Role::Scorer]);
    }

    #[test]
    fn test_role_gate_empty_list_denies_everyone() {
        let gate = RoleGate::new([]);
        for role in Role::ALL {
            assert!(!gate.check(Some(&as_role(role))).is_render());
        }
    }

    #[test]
    fn test_guest_gate_redirects_signed_in_to_dashboard() {
        assert_eq!(
            GuestGate.check(Some(&as_role(Role::Scorer))),
            GuardDecision::Redirect(Route::Dashboard)
        );
        assert!(GuestGate.check(None).is_render());
    }

    #[test]
    fn test_access_public_renders_for_everyone() {
        assert!(Access::Public.check(None).is_render());
        assert!(Access::Public.check(Some(&as_role(Role::Admin))).is_render());
    }
}
