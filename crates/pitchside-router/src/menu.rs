//! Role-dependent dashboard chrome: the sidebar and the home panel.

use pitchside_protocol::{Principal, Role};

use crate::{Route, RouteGuard};

/// One sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarLink {
    pub route: Route,
    pub label: &'static str,
}

impl SidebarLink {
    /// Whether this link should be highlighted while `current` is shown.
    pub fn is_active(&self, current: &Route) -> bool {
        self.route == *current
    }
}

/// Every sidebar entry, in display order.
fn all_links() -> [SidebarLink; 6] {
    [
        SidebarLink { route: Route::AddTournament, label: "Add Tournament" },
        SidebarLink { route: Route::AddTeam, label: "Add Team" },
        SidebarLink { route: Route::AddPlayers, label: "Add Players" },
        SidebarLink { route: Route::AddMatches, label: "Add Matches" },
        SidebarLink { route: Route::Scorer, label: "Match" },
        SidebarLink { route: Route::SuperAdmin, label: "Add Admin" },
    ]
}

/// The sidebar for `role`: exactly the entries whose route gate lets that
/// role through, so a link never leads to a redirect.
pub fn sidebar_links(role: Role) -> Vec<SidebarLink> {
    let principal = Principal::new("sidebar", role);
    all_links()
        .into_iter()
        .filter(|link| link.route.access().check(Some(&principal)).is_render())
        .collect()
}

/// What the dashboard's index page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeVariant {
    /// Payments panel, for admins.
    Payments,
    /// Plain welcome, for everyone else.
    Welcome,
}

pub fn home_variant(role: Role) -> HomeVariant {
    match role {
        Role::Admin => HomeVariant::Payments,
        Role::Captain | Role::Scorer | Role::SuperAdmin => HomeVariant::Welcome,
    }
}
