//! Navigation state for one console tab.

use pitchside_protocol::Principal;

use crate::{GuardDecision, Route, RouteGuard};

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The requested route is shown.
    Rendered(Route),
    /// A gate sent the user elsewhere.
    Redirected { requested: Route, to: Route },
}

impl Navigation {
    /// The route that ends up on screen.
    pub fn shown(&self) -> &Route {
        match self {
            Self::Rendered(route) => route,
            Self::Redirected { to, .. } => to,
        }
    }
}

/// Tracks the route on screen and, after a redirect to the login page,
/// the route the user was trying to reach.
///
/// The principal is passed into every call instead of being looked up, so
/// the caller decides which session is authoritative.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Route,
    pending: Option<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Starts on the public home page.
    pub fn new() -> Self {
        Self {
            current: Route::Home,
            pending: None,
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    /// The route waiting for a sign-in, if any.
    pub fn pending(&self) -> Option<&Route> {
        self.pending.as_ref()
    }

    /// Requests `route` on behalf of `principal`.
    ///
    /// A redirect to the login page remembers `route` for
    /// [`after_sign_in`](Self::after_sign_in). Rendering any other route
    /// forgets it.
    pub fn navigate(
        &mut self,
        route: Route,
        principal: Option<&Principal>,
    ) -> Navigation {
        match route.access().check(principal) {
            GuardDecision::Render => {
                if route != Route::Login {
                    self.pending = None;
                }
                self.current = route.clone();
                Navigation::Rendered(route)
            }
            GuardDecision::Redirect(to) => {
                tracing::debug!(requested = %route, to = %to, "redirecting");
                if to == Route::Login {
                    self.pending = Some(route.clone());
                }
                self.current = to.clone();
                Navigation::Redirected {
                    requested: route,
                    to,
                }
            }
        }
    }

    /// Where to go once `principal` has signed in: the remembered route if
    /// this principal may see it, the dashboard otherwise.
    pub fn after_sign_in(&mut self, principal: &Principal) -> Route {
        let target = self
            .pending
            .take()
            .filter(|route| route.access().check(Some(principal)).is_render())
            .unwrap_or(Route::Dashboard);
        self.current = target.clone();
        target
    }

    /// Sign-out always lands on the public home page.
    pub fn after_sign_out(&mut self) -> Route {
        self.pending = None;
        self.current = Route::Home;
        Route::Home
    }
}
