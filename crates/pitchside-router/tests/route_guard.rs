//! Routing across the whole table: parse a path, check its gate, follow
//! the navigator through a sign-in.

use pitchside_protocol::{Principal, Role};
use pitchside_router::{
    GuardDecision, Navigation, Navigator, PresenceGate, RoleGate, Route,
    RouteGuard, sidebar_links,
};

// =========================================================================
// Gate properties
// =========================================================================

#[test]
fn test_admin_gate_matrix() {
    let gate = RoleGate::new([Role::Admin]);

    let captain = Principal::new("c", Role::Captain);
    let admin = Principal::new("a", Role::Admin);

    assert_eq!(gate.check(Some(&captain)), GuardDecision::Redirect(Route::Login));
    assert_eq!(gate.check(None), GuardDecision::Redirect(Route::Login));
    assert_eq!(gate.check(Some(&admin)), GuardDecision::Render);
}

#[test]
fn test_presence_then_sign_in_renders_without_second_redirect() {
    let mut nav = Navigator::new();

    let first = nav.navigate(Route::Dashboard, None);
    assert_eq!(
        first,
        Navigation::Redirected {
            requested: Route::Dashboard,
            to: Route::Login
        }
    );

    let principal = Principal::new("u1", Role::Captain);
    let landed = nav.after_sign_in(&principal);
    assert_eq!(landed, Route::Dashboard);
    assert!(PresenceGate.check(Some(&principal)).is_render());
    assert_eq!(
        nav.navigate(landed, Some(&principal)),
        Navigation::Rendered(Route::Dashboard)
    );
}

// =========================================================================
// Whole table
// =========================================================================

#[test]
fn test_every_dashboard_route_requires_a_principal() {
    let paths = [
        "/dashboard",
        "/dashboard/addtournament",
        "/dashboard/addteam",
        "/dashboard/addplayers",
        "/dashboard/addmatches",
        "/dashboard/scorer",
        "/dashboard/match-details/m-1",
        "/dashboard/superadmin",
    ];
    for path in paths {
        let route: Route = path.parse().unwrap();
        assert!(route.is_dashboard(), "{path}");
        assert_eq!(
            route.access().check(None),
            GuardDecision::Redirect(Route::Login),
            "{path}"
        );
    }
}

#[test]
fn test_each_role_reaches_exactly_its_sidebar() {
    let gated = [
        Route::AddTournament,
        Route::AddTeam,
        Route::AddPlayers,
        Route::AddMatches,
        Route::Scorer,
        Route::SuperAdmin,
    ];
    for role in Role::ALL {
        let principal = Principal::new("u", role);
        let reachable: Vec<Route> = gated
            .iter()
            .filter(|r| r.access().check(Some(&principal)).is_render())
            .cloned()
            .collect();
        let sidebar: Vec<Route> =
            sidebar_links(role).into_iter().map(|l| l.route).collect();
        assert_eq!(reachable, sidebar, "{role}");
    }
}

#[test]
fn test_scorer_reaches_match_details() {
    let route: Route = "/dashboard/match-details/m-42".parse().unwrap();
    let scorer = Principal::new("s", Role::Scorer);
    let admin = Principal::new("a", Role::Admin);

    assert!(route.access().check(Some(&scorer)).is_render());
    assert!(!route.access().check(Some(&admin)).is_render());
}

#[test]
fn test_public_pages_render_for_everyone() {
    for path in ["/", "/tournaments", "/team/t-3", "/live", "/matches", "/pointstable"] {
        let route: Route = path.parse().unwrap();
        assert!(route.access().check(None).is_render(), "{path}");
        for role in Role::ALL {
            let p = Principal::new("u", role);
            assert!(route.access().check(Some(&p)).is_render(), "{path} {role}");
        }
    }
}
