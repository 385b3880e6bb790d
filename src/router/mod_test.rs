use super::*;

// =============================================================================
// route table
// =============================================================================

#[test]
fn every_route_name_has_one_descriptor() {
    let names = [
        RouteName::Root,
        RouteName::Library,
        RouteName::GameDetails,
        RouteName::Search,
        RouteName::Login,
        RouteName::Register,
    ];
    for name in names {
        assert_eq!(ROUTES.iter().filter(|r| r.name == name).count(), 1, "{}", name.as_str());
        assert_eq!(name.descriptor().name, name);
    }
    assert_eq!(ROUTES.len(), names.len());
}

#[test]
fn descriptor_paths_per_route() {
    assert_eq!(RouteName::Root.descriptor().path, "/");
    assert_eq!(RouteName::Library.descriptor().path, "/library");
    assert_eq!(RouteName::GameDetails.descriptor().path, "/games/:id");
    assert_eq!(RouteName::Search.descriptor().path, "/search");
    assert_eq!(RouteName::Login.descriptor().path, "/login");
    assert_eq!(RouteName::Register.descriptor().path, "/register");
}

#[test]
fn auth_requirements_match_table() {
    assert!(RouteName::Library.descriptor().requires_auth);
    assert!(RouteName::GameDetails.descriptor().requires_auth);
    assert!(RouteName::Search.descriptor().requires_auth);
    assert!(!RouteName::Login.descriptor().requires_auth);
    assert!(!RouteName::Register.descriptor().requires_auth);
}

// =============================================================================
// resolve
// =============================================================================

#[test]
fn resolve_static_paths() {
    assert_eq!(resolve("/library").unwrap().name, RouteName::Library);
    assert_eq!(resolve("/search").unwrap().name, RouteName::Search);
    assert_eq!(resolve("/").unwrap().name, RouteName::Root);
}

#[test]
fn resolve_captures_params() {
    let loc = resolve("/games/3498").unwrap();
    assert_eq!(loc.name, RouteName::GameDetails);
    assert_eq!(loc.param("id"), Some("3498"));
    assert_eq!(loc.path, "/games/3498");
}

#[test]
fn resolve_ignores_query_fragment_and_trailing_slash() {
    assert_eq!(resolve("/search?q=zelda").unwrap().name, RouteName::Search);
    assert_eq!(resolve("/library/").unwrap().path, "/library");
    assert_eq!(resolve("/login#top").unwrap().name, RouteName::Login);
    assert_eq!(resolve("").unwrap().name, RouteName::Root);
    assert_eq!(resolve("library").unwrap().name, RouteName::Library);
}

#[test]
fn resolve_unknown_paths() {
    assert!(resolve("/games").is_none());
    assert!(resolve("/games/1/extra").is_none());
    assert!(resolve("/nope").is_none());
}

// =============================================================================
// navigate
// =============================================================================

fn signed_in_router() -> Router {
    let session = SessionStore::in_memory();
    session.save("t1", 42).unwrap();
    Router::new(session)
}

#[test]
fn protected_navigation_signed_out_lands_on_login() {
    let mut router = Router::new(SessionStore::in_memory());
    for path in ["/library", "/search", "/games/7"] {
        let nav = router.navigate(path).unwrap();
        assert_eq!(nav.location.name, RouteName::Login, "{path}");
        assert!(nav.redirected);
    }
}

#[test]
fn protected_navigation_signed_in_is_allowed() {
    let mut router = signed_in_router();
    let nav = router.navigate("/games/7").unwrap();
    assert_eq!(nav.location.name, RouteName::GameDetails);
    assert_eq!(nav.location.param("id"), Some("7"));
    assert!(!nav.redirected);
    assert_eq!(router.current(), Some(&nav.location));
}

#[test]
fn login_while_signed_in_redirects_to_library() {
    let mut router = signed_in_router();
    assert_eq!(router.navigate("/login").unwrap().location.name, RouteName::Library);
    assert_eq!(router.navigate("/register").unwrap().location.name, RouteName::Library);
}

#[test]
fn root_redirects_to_login_then_guard_applies() {
    let mut signed_out = Router::new(SessionStore::in_memory());
    assert_eq!(signed_out.navigate("/").unwrap().location.name, RouteName::Login);

    let mut signed_in = signed_in_router();
    let nav = signed_in.navigate("/").unwrap();
    assert_eq!(nav.location.name, RouteName::Library);
    assert!(nav.redirected);
}

#[test]
fn guard_rereads_session_on_each_navigation() {
    let session = SessionStore::in_memory();
    let mut router = Router::new(session.clone());

    session.save("t1", 1).unwrap();
    assert_eq!(router.navigate("/library").unwrap().location.name, RouteName::Library);

    session.clear().unwrap();
    assert_eq!(router.navigate("/library").unwrap().location.name, RouteName::Login);
}

#[test]
fn half_written_session_is_treated_as_signed_out() {
    use crate::session::{KeyValueStorage, MemoryStorage, TOKEN_KEY};
    use std::sync::Arc;

    let storage = Arc::new(MemoryStorage::new());
    storage.set_entries(&[(TOKEN_KEY, "t1")]).unwrap();
    let mut router = Router::new(SessionStore::new(storage));

    assert_eq!(router.navigate("/library").unwrap().location.name, RouteName::Login);
}

#[test]
fn unknown_path_is_not_found_and_keeps_current() {
    let mut router = signed_in_router();
    router.navigate("/library").unwrap();

    assert_eq!(router.navigate("/nope"), Err(RouteError::NotFound("/nope".into())));
    assert_eq!(router.current().map(|l| l.name), Some(RouteName::Library));
}
