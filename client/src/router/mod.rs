//! Route table and authentication guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every view sits behind a path. Before a navigation lands, [`guard`] checks
//! the stored token: protected views bounce to `/login` without one, and
//! `/login` bounces to `/` with one. The API client reaches the router through
//! the [`Navigator`] trait when a 401 forces the user back to `/login`.


use std::sync::{Mutex, PoisonError};

use crate::state::session::Session;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Screen bound to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    Register,
    Dashboard,
    Devices,
    Monitoring,
    PacketCapture,
    Analytics,
}

/// Static route descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub view: View,
    pub requires_auth: bool,
}

pub const ROUTES: &[Route] = &[
    Route { path: LOGIN_PATH, name: "Login", view: View::Login, requires_auth: false },
    Route { path: "/register", name: "Register", view: View::Register, requires_auth: false },
    Route { path: HOME_PATH, name: "Dashboard", view: View::Dashboard, requires_auth: true },
    Route { path: "/devices", name: "Devices", view: View::Devices, requires_auth: true },
    Route { path: "/monitoring", name: "Monitoring", view: View::Monitoring, requires_auth: true },
    Route { path: "/packet-capture", name: "PacketCapture", view: View::PacketCapture, requires_auth: true },
    Route { path: "/analytics", name: "Analytics", view: View::Analytics, requires_auth: true },
];

/// Look up the route bound to `path`. A single trailing slash is ignored.
#[must_use]
pub fn find(path: &str) -> Option<&'static Route> {
    let path = normalize(path);
    ROUTES.iter().find(|route| route.path == path)
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    }
}

// =============================================================================
// GUARD
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(&'static str),
}

/// Decide whether a navigation to `target` may proceed.
///
/// Unknown paths carry no auth requirement and always proceed.
#[must_use]
pub fn guard(target: &str, has_token: bool) -> Navigation {
    let requires_auth = find(target).is_some_and(|route| route.requires_auth);
    if requires_auth && !has_token {
        Navigation::Redirect(LOGIN_PATH)
    } else if normalize(target) == LOGIN_PATH && has_token {
        Navigation::Redirect(HOME_PATH)
    } else {
        Navigation::Proceed
    }
}

// =============================================================================
// ROUTER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("no view is bound to `{0}`")]
    NotFound(String),
}

/// Seam through which non-router code forces a navigation.
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

/// Guarded history over the static route table.
#[derive(Debug)]
pub struct Router {
    session: Session,
    location: Mutex<String>,
}

impl Router {
    /// Router positioned at `/`, before any guard has run.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self { session, location: Mutex::new(HOME_PATH.to_owned()) }
    }

    /// Current path.
    #[must_use]
    pub fn location(&self) -> String {
        self.location.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Navigate to `target`, applying the guard against the stored token.
    ///
    /// Guard redirects are followed once; the two redirect rules are mutually
    /// exclusive, so a redirect target always proceeds. The location is
    /// updated even when the final path has no view bound to it.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NotFound`] when the final path matches no route.
    pub fn navigate(&self, target: &str) -> Result<&'static Route, RouteError> {
        let has_token = self.session.is_authenticated();
        let destination = match guard(target, has_token) {
            Navigation::Proceed => normalize(target),
            Navigation::Redirect(path) => {
                tracing::debug!(from = target, to = path, "route guard redirect");
                path
            }
        };
        *self.location.lock().unwrap_or_else(PoisonError::into_inner) = destination.to_owned();
        find(destination).ok_or_else(|| RouteError::NotFound(destination.to_owned()))
    }
}

impl Navigator for Router {
    fn redirect(&self, path: &str) {
        if let Err(e) = self.navigate(path) {
            tracing::warn!(error = %e, "forced navigation landed on an unknown path");
        }
    }
}
