//! Named routes and guarded navigation
//!
//! [`Router`] resolves a path, applies static redirects, asks the
//! [`NavigationGuard`] and follows guard redirects by route name until it
//! lands somewhere.

use std::sync::Arc;

use log::debug;

pub mod guard;
pub mod routes;

pub use guard::{AuthProbe, Navigation, NavigationGuard};
pub use routes::{Resolution, ResolvedRoute, RouteRecord, RouteTable, names};

use crate::error::{Result, RouterError};
use crate::session::SessionEvent;

/// Upper bound on redirects followed for one navigation
const MAX_REDIRECTS: usize = 10;

pub struct Router<P: AuthProbe + ?Sized> {
    table: RouteTable,
    guard: NavigationGuard<P>,
    current: Option<ResolvedRoute>,
}

impl<P: AuthProbe + ?Sized> Router<P> {
    pub fn new(table: RouteTable, probe: Arc<P>) -> Self {
        Self {
            table,
            guard: NavigationGuard::new(probe),
            current: None,
        }
    }

    pub fn current(&self) -> Option<&ResolvedRoute> {
        self.current.as_ref()
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Navigate to `path`, returning where navigation ended up.
    ///
    /// The guard sees the route we are leaving as `from` for every hop,
    /// including hops caused by its own redirects.
    pub fn push(&mut self, path: &str) -> Result<&ResolvedRoute> {
        let from = self.current.clone();
        let mut target = path.to_string();

        for _ in 0..MAX_REDIRECTS {
            let route = match self.table.resolve(&target) {
                Resolution::Redirect(to) => {
                    debug!("{} redirects to {}", target, to);
                    target = to.to_string();
                    continue;
                }
                Resolution::Page(route) => route,
            };

            match self.guard.check(&route, from.as_ref()) {
                Navigation::Proceed => {
                    debug!("Navigated to {} ({})", route.name, route.path);
                    return Ok(&*self.current.insert(route));
                }
                Navigation::Redirect(name) => {
                    debug!("Guard redirected {} to {}", route.name, name);
                    target = self.path_of(name)?.to_string();
                }
            }
        }

        Err(RouterError::RedirectLoop(path.to_string()).into())
    }

    /// Navigate to a route by name.
    pub fn push_name(&mut self, name: &str) -> Result<&ResolvedRoute> {
        let path = self.path_of(name)?;
        self.push(path)
    }

    /// Hard navigation after a logout or expiry: the current route is
    /// dropped before landing on the event's target.
    pub fn handle_session_event(&mut self, event: SessionEvent) -> Result<&ResolvedRoute> {
        debug!("Session event {:?}, resetting navigation", event);
        self.current = None;
        self.push_name(event.redirect_target())
    }

    fn path_of(&self, name: &str) -> Result<&'static str> {
        self.table
            .path_of(name)
            .ok_or_else(|| RouterError::UnknownRoute(name.to_string()).into())
    }
}
