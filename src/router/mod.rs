//! Client-side routing.
//!
//! DESIGN
//! ======
//! The route table is static. Navigating resolves a path to a descriptor,
//! applies the descriptor's static redirect, then runs the guard with the
//! session read fresh. Guard redirects are navigations too, so each hop is
//! evaluated again. A hop limit stops a misconfigured table from looping.

pub mod guard;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use std::collections::BTreeMap;

use crate::session::SessionStore;
use guard::GuardDecision;

const MAX_REDIRECTS: usize = 4;

// =============================================================================
// ROUTE TABLE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteName {
    Root,
    Library,
    GameDetails,
    Search,
    Login,
    Register,
}

impl RouteName {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Library => "library",
            Self::GameDetails => "game-details",
            Self::Search => "search",
            Self::Login => "login",
            Self::Register => "register",
        }
    }

    /// The table entry for this route.
    #[must_use]
    pub fn descriptor(self) -> &'static RouteDescriptor {
        // Indices follow ROUTES order.
        match self {
            Self::Root => &ROUTES[0],
            Self::Library => &ROUTES[1],
            Self::GameDetails => &ROUTES[2],
            Self::Search => &ROUTES[3],
            Self::Login => &ROUTES[4],
            Self::Register => &ROUTES[5],
        }
    }
}

/// Static description of one route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Pattern; `:name` segments capture a parameter.
    pub path: &'static str,
    pub name: RouteName,
    pub requires_auth: bool,
    /// Unconditional redirect applied before the guard.
    pub redirect: Option<RouteName>,
}

pub const ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor { path: "/", name: RouteName::Root, requires_auth: false, redirect: Some(RouteName::Login) },
    RouteDescriptor { path: "/library", name: RouteName::Library, requires_auth: true, redirect: None },
    RouteDescriptor { path: "/games/:id", name: RouteName::GameDetails, requires_auth: true, redirect: None },
    RouteDescriptor { path: "/search", name: RouteName::Search, requires_auth: true, redirect: None },
    RouteDescriptor { path: "/login", name: RouteName::Login, requires_auth: false, redirect: None },
    RouteDescriptor { path: "/register", name: RouteName::Register, requires_auth: false, redirect: None },
];

// =============================================================================
// LOCATION
// =============================================================================

/// A resolved route with its captured parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub name: RouteName,
    pub path: String,
    pub params: BTreeMap<String, String>,
}

impl Location {
    /// Location of a parameterless route.
    #[must_use]
    pub fn of(name: RouteName) -> Self {
        Self { name, path: name.descriptor().path.to_owned(), params: BTreeMap::new() }
    }

    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Strip query and fragment, collapse a trailing slash.
fn normalize_path(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let path = raw[..end].trim();
    let path = path.trim_end_matches('/');
    if path.is_empty() {
        "/".to_owned()
    } else if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}

fn match_pattern(pattern: &str, path: &str) -> Option<BTreeMap<String, String>> {
    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = BTreeMap::new();
    for (expected, actual) in pattern_segments.iter().zip(&path_segments) {
        if let Some(key) = expected.strip_prefix(':') {
            params.insert(key.to_owned(), (*actual).to_owned());
        } else if expected != actual {
            return None;
        }
    }
    Some(params)
}

/// Resolve a path against the route table.
#[must_use]
pub fn resolve(raw: &str) -> Option<Location> {
    let path = normalize_path(raw);
    ROUTES.iter().find_map(|route| {
        match_pattern(route.path, &path).map(|params| Location { name: route.name, path: path.clone(), params })
    })
}

// =============================================================================
// ROUTER
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("page not found: {0}")]
    NotFound(String),
    #[error("too many redirects navigating to {0}")]
    RedirectLoop(String),
}

/// Result of a completed navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub requested: String,
    pub location: Location,
    pub redirected: bool,
}

/// Navigation entry point. Re-reads the session on every call.
#[derive(Debug)]
pub struct Router {
    session: SessionStore,
    current: Option<Location>,
}

impl Router {
    #[must_use]
    pub fn new(session: SessionStore) -> Self {
        Self { session, current: None }
    }

    #[must_use]
    pub fn current(&self) -> Option<&Location> {
        self.current.as_ref()
    }

    /// Navigate to `path`, following static and guard redirects.
    ///
    /// # Errors
    ///
    /// `RouteError::NotFound` for unknown paths; `RouteError::RedirectLoop`
    /// if redirects do not settle.
    pub fn navigate(&mut self, path: &str) -> Result<Navigation, RouteError> {
        let mut location = resolve(path).ok_or_else(|| RouteError::NotFound(path.to_owned()))?;
        let mut redirected = false;

        for _ in 0..=MAX_REDIRECTS {
            let descriptor = location.name.descriptor();
            if let Some(target) = descriptor.redirect {
                location = Location::of(target);
                redirected = true;
                continue;
            }

            match guard::evaluate(descriptor, self.session.is_authenticated()) {
                GuardDecision::Allow => {
                    tracing::debug!(requested = path, resolved = %location.path, redirected, "navigation allowed");
                    self.current = Some(location.clone());
                    return Ok(Navigation { requested: path.to_owned(), location, redirected });
                }
                GuardDecision::Redirect(target) => {
                    location = Location::of(target);
                    redirected = true;
                }
            }
        }

        Err(RouteError::RedirectLoop(path.to_owned()))
    }
}
