//! Integration tests for route resolution through the session guard.

use content_studio_auth::{MemorySessionStore, Session, SessionStore};
use content_studio_ui::{Route, resolve_route};

const PROTECTED: [Route; 3] = [Route::Dashboard, Route::Result, Route::ImageGenerator];

#[test]
fn navigation_guard_tests_redirects_protected_routes_without_token() {
    let store = MemorySessionStore::new();

    for route in PROTECTED {
        for result_available in [false, true] {
            let navigation = resolve_route(route, &store, result_available);
            assert_eq!(navigation.resolved, Route::Login, "{route}");
            assert!(navigation.redirected());
        }
    }
    assert_eq!(resolve_route(Route::Root, &store, false).resolved, Route::Login);
}

#[test]
fn navigation_guard_tests_allows_protected_routes_with_token() {
    let store = MemorySessionStore::new();
    store
        .set_session(&Session::new("T", "A"))
        .expect("session should store");

    assert_eq!(
        resolve_route(Route::Dashboard, &store, false).resolved,
        Route::Dashboard
    );
    assert_eq!(
        resolve_route(Route::ImageGenerator, &store, false).resolved,
        Route::ImageGenerator
    );
    assert_eq!(resolve_route(Route::Result, &store, true).resolved, Route::Result);
    assert_eq!(resolve_route(Route::Root, &store, false).resolved, Route::Dashboard);
}

#[test]
fn navigation_guard_tests_result_without_response_returns_to_dashboard() {
    let store = MemorySessionStore::new();
    store
        .set_session(&Session::new("T", "A"))
        .expect("session should store");

    let navigation = resolve_route(Route::Result, &store, false);
    assert_eq!(navigation.requested, Route::Result);
    assert_eq!(navigation.resolved, Route::Dashboard);
}

#[test]
fn navigation_guard_tests_public_routes_never_redirect() {
    let store = MemorySessionStore::new();
    assert!(!resolve_route(Route::Login, &store, false).redirected());
    assert!(!resolve_route(Route::Register, &store, false).redirected());
}
