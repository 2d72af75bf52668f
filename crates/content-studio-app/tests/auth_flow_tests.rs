//! Integration tests for login, registration and logout through the client.

mod common;

use content_studio_auth::{AuthMode, REGISTRATION_NOTICE, SessionStore};
use content_studio_ui::{AuthOutcome, AuthScreen, Route};
use serde_json::json;

fn login_screen() -> AuthScreen {
    let mut screen = AuthScreen::new(AuthMode::Login);
    screen.form.email = "a@b.com".to_string();
    screen.form.password = "x".to_string();
    screen
}

#[test]
fn auth_flow_tests_login_persists_session_and_opens_dashboard() {
    let mut harness = common::harness();
    harness.transport.push_reply(
        200,
        r#"{"access_token":"T","token_type":"bearer","username":"A"}"#,
    );
    let mut screen = login_screen();

    let outcome = harness
        .studio
        .submit_auth(&mut screen)
        .expect("login should run");

    assert_eq!(outcome, AuthOutcome::LoggedIn);
    assert_eq!(harness.session.token().as_deref(), Some("T"));
    assert_eq!(harness.session.username().as_deref(), Some("A"));
    assert_eq!(harness.studio.route(), Route::Dashboard);

    let requests = harness.transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.as_str(), "http://localhost:8000/login");
    assert_eq!(
        requests[0].body,
        Some(json!({"email": "a@b.com", "password": "x"}))
    );
}

#[test]
fn auth_flow_tests_rejected_login_shows_server_detail() {
    let mut harness = common::harness();
    harness
        .transport
        .push_reply(401, r#"{"detail":"Invalid credentials"}"#);
    let mut screen = login_screen();

    let outcome = harness
        .studio
        .submit_auth(&mut screen)
        .expect("login should run");

    assert_eq!(outcome, AuthOutcome::Failed);
    assert_eq!(screen.error(), Some("Invalid credentials"));
    assert!(!screen.is_loading());
    assert_eq!(harness.session.token(), None);
    assert_eq!(harness.studio.route(), Route::Root);
}

#[test]
fn auth_flow_tests_detail_less_failure_uses_fallback() {
    let mut harness = common::harness();
    harness.transport.push_reply(500, "Internal Server Error");
    let mut screen = login_screen();

    harness
        .studio
        .submit_auth(&mut screen)
        .expect("login should run");

    assert_eq!(screen.error(), Some("Authentication failed"));
}

#[test]
fn auth_flow_tests_registration_switches_to_login_with_notice() {
    let mut harness = common::harness();
    harness.transport.push_reply(
        200,
        r#"{"message":"User created successfully","user":"A"}"#,
    );
    let mut screen = AuthScreen::new(AuthMode::Register);
    screen.form.username = "A".to_string();
    screen.form.email = "a@b.com".to_string();
    screen.form.password = "x".to_string();

    let outcome = harness
        .studio
        .submit_auth(&mut screen)
        .expect("register should run");

    assert_eq!(outcome, AuthOutcome::Registered);
    assert_eq!(screen.mode(), AuthMode::Login);
    assert_eq!(screen.notice(), Some(REGISTRATION_NOTICE));
    assert_eq!(harness.session.token(), None);
    assert_eq!(harness.studio.route(), Route::Login);
}

#[test]
fn auth_flow_tests_blank_fields_never_reach_the_network() {
    let mut harness = common::harness();
    let mut screen = AuthScreen::new(AuthMode::Login);
    screen.form.email = "a@b.com".to_string();

    assert!(harness.studio.submit_auth(&mut screen).is_err());
    assert!(harness.transport.requests().is_empty());
}

#[test]
fn auth_flow_tests_logout_clears_session_and_guards_dashboard() {
    let mut harness = common::signed_in_harness();
    assert_eq!(
        harness.studio.navigate("/dashboard").resolved,
        Route::Dashboard
    );

    let navigation = harness.studio.logout().expect("logout should clear");

    assert_eq!(navigation.resolved, Route::Login);
    assert_eq!(harness.session.token(), None);
    assert_eq!(harness.session.username(), None);
    assert_eq!(harness.studio.navigate("/dashboard").resolved, Route::Login);
}
