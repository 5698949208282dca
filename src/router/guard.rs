//! Navigation guard
//!
//! Runs before every transition. Decisions, in order:
//!
//! | target requires auth | logged in | target is login | from register | action            |
//! |----------------------|-----------|-----------------|---------------|-------------------|
//! | yes                  | no        | -               | -             | redirect login    |
//! | yes                  | yes       | -               | -             | proceed           |
//! | no                   | yes       | yes             | no            | redirect dashboard|
//! | no                   | yes       | yes             | yes           | proceed           |
//! | no                   | any       | no              | any           | proceed           |

use std::sync::Arc;

use super::routes::{ResolvedRoute, names};
use crate::session::SessionManager;

/// Answers whether a session is currently valid.
pub trait AuthProbe: Send + Sync {
    fn is_logged_in(&self) -> bool;
}

impl AuthProbe for SessionManager {
    fn is_logged_in(&self) -> bool {
        SessionManager::is_logged_in(self)
    }
}

/// Guard decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    /// Navigate to the named route instead
    Redirect(&'static str),
}

pub struct NavigationGuard<P: AuthProbe + ?Sized> {
    probe: Arc<P>,
}

impl<P: AuthProbe + ?Sized> NavigationGuard<P> {
    pub fn new(probe: Arc<P>) -> Self {
        Self { probe }
    }

    pub fn check(&self, to: &ResolvedRoute, from: Option<&ResolvedRoute>) -> Navigation {
        let logged_in = self.probe.is_logged_in();

        if to.requires_auth && !logged_in {
            return Navigation::Redirect(names::LOGIN);
        }

        // A freshly registered user is sent to login; let them see it once
        let from_register = from.is_some_and(|r| r.is(names::REGISTER));
        if to.is(names::LOGIN) && logged_in && !from_register {
            return Navigation::Redirect(names::DASHBOARD);
        }

        Navigation::Proceed
    }
}
