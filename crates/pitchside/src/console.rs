//! `Console` builder and per-tab state.
//!
//! This is the entry point for a Pitchside front end. It ties together
//! the layers: session store → expiry sweep → auth gateway → router.

use pitchside_auth::{AuthGateway, HttpAuthGateway};
use pitchside_protocol::{Credentials, Principal};
use pitchside_router::{HomeVariant, Navigation, Navigator, Route, SidebarLink};
use pitchside_session::{
    Clock, ExpirySweep, MemoryStorage, SessionStore, SystemClock, TabStorage,
};

use crate::{ConsoleConfig, PitchsideError};

/// Builder for a [`Console`].
///
/// # Example
///
/// ```rust,ignore
/// let console = ConsoleBuilder::new()
///     .config(ConsoleConfig::from_env()?)
///     .build_http()?;
/// ```
#[derive(Default)]
pub struct ConsoleBuilder {
    config: ConsoleConfig,
    storage: Option<Box<dyn TabStorage>>,
    clock: Option<Box<dyn Clock>>,
}

impl ConsoleBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration. `config.session` decides the login
    /// duration and the sweep interval of the store the console opens.
    pub fn config(mut self, config: ConsoleConfig) -> Self {
        self.config = config;
        self
    }

    /// Tab storage to open the session store over (default: a fresh
    /// [`MemoryStorage`]).
    ///
    /// A reload is modelled by building a second console over a clone of
    /// the first one's storage: the stored session is restored.
    pub fn storage(mut self, storage: impl TabStorage) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    /// Clock for session expiry (default: [`SystemClock`]).
    pub fn clock(mut self, clock: impl Clock) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Opens the session store, builds the console around `gateway` and
    /// starts the expiry sweep.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime (the sweep is a task).
    pub fn build<G: AuthGateway>(self, gateway: G) -> Console<G> {
        let storage: Box<dyn TabStorage> = match self.storage {
            Some(storage) => storage,
            None => Box::new(MemoryStorage::new()),
        };
        let clock: Box<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Box::new(SystemClock),
        };
        let store =
            SessionStore::open(self.config.session.clone(), storage, clock);
        let sweep = ExpirySweep::for_store(&store);
        tracing::info!(
            api = %self.config.api_base_url,
            restored = store.is_authenticated(),
            "console started"
        );

        Console {
            config: self.config,
            store,
            gateway,
            navigator: Navigator::new(),
            sweep: Some(sweep),
        }
    }

    /// Builds the console with an [`HttpAuthGateway`] pointed at the
    /// configured API.
    ///
    /// # Errors
    /// [`PitchsideError::Auth`] if the HTTP client can't be configured.
    pub fn build_http(self) -> Result<Console<HttpAuthGateway>, PitchsideError> {
        let gateway = HttpAuthGateway::with_timeout(
            &self.config.api_base_url,
            self.config.request_timeout,
        )?;
        Ok(self.build(gateway))
    }
}

/// One console tab: its session, its sign-in path and where it is.
///
/// Call [`shutdown()`](Self::shutdown) when the tab goes away; dropping
/// the console also stops the sweep, just without waiting for it.
pub struct Console<G: AuthGateway> {
    config: ConsoleConfig,
    store: SessionStore,
    gateway: G,
    navigator: Navigator,
    sweep: Option<ExpirySweep>,
}

impl<G: AuthGateway> Console<G> {
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// The session store, for subscribing or for sharing with views.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn current_principal(&self) -> Option<Principal> {
        self.store.current_principal()
    }

    /// The route on screen.
    pub fn current_route(&self) -> &Route {
        self.navigator.current()
    }

    /// Opens `path` for whoever is signed in right now.
    ///
    /// # Errors
    /// [`PitchsideError::Route`] if nothing is mounted at `path`.
    pub fn navigate(&mut self, path: &str) -> Result<Navigation, PitchsideError> {
        let route = Route::parse(path)?;
        Ok(self.navigate_to(route))
    }

    pub fn navigate_to(&mut self, route: Route) -> Navigation {
        let principal = self.store.current_principal();
        self.navigator.navigate(route, principal.as_ref())
    }

    /// Re-checks the route on screen, e.g. after the session changed
    /// underneath it. An expired session on a dashboard page lands on the
    /// login page with that page remembered.
    pub fn revalidate(&mut self) -> Navigation {
        let route = self.navigator.current().clone();
        self.navigate_to(route)
    }

    /// Signs in through the gateway and moves to the page the user was
    /// sent away from, or the dashboard.
    ///
    /// # Errors
    /// [`PitchsideError::Auth`]; the session and the current route are
    /// unchanged.
    pub async fn sign_in(
        &mut self,
        credentials: &Credentials,
    ) -> Result<Route, PitchsideError> {
        let principal =
            pitchside_auth::sign_in(&self.gateway, &self.store, credentials).await?;
        Ok(self.navigator.after_sign_in(&principal))
    }

    /// Ends the session and returns to the public home page.
    pub fn sign_out(&mut self) -> Route {
        self.store.logout();
        tracing::info!("signed out");
        self.navigator.after_sign_out()
    }

    /// Sidebar entries for the signed-in role; empty when signed out.
    pub fn sidebar(&self) -> Vec<SidebarLink> {
        self.store
            .current_principal()
            .map(|p| pitchside_router::sidebar_links(p.role))
            .unwrap_or_default()
    }

    /// What the dashboard home shows, if anyone is signed in.
    pub fn home_variant(&self) -> Option<HomeVariant> {
        self.store
            .current_principal()
            .map(|p| pitchside_router::home_variant(p.role))
    }

    /// Stops the expiry sweep and waits for it.
    pub async fn shutdown(mut self) {
        if let Some(sweep) = self.sweep.take() {
            sweep.shutdown().await;
        }
        tracing::info!("console shut down");
    }
}
