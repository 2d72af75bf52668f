//! Integration tests for the status snapshot and health probe.

mod common;

use content_studio_app::app_version;

#[test]
fn runtime_status_tests_reflects_session_and_route() {
    let mut harness = common::signed_in_harness();
    harness.studio.navigate("/image-generator");

    let snapshot = harness.studio.status();

    assert_eq!(snapshot.version, app_version());
    assert_eq!(snapshot.api_base_url, "http://localhost:8000/");
    assert!(snapshot.signed_in);
    assert_eq!(snapshot.username.as_deref(), Some("A"));
    assert_eq!(snapshot.route, "/image-generator");
    assert!(!snapshot.result_cached);
}

#[test]
fn runtime_status_tests_health_probe_reads_backend_message() {
    let harness = common::harness();
    harness
        .transport
        .push_reply(200, r#"{"message":"Content Studio AI Backend is Running"}"#);

    let health = harness.studio.health().expect("health probe should succeed");

    assert_eq!(health.message, "Content Studio AI Backend is Running");
    assert_eq!(
        harness.transport.requests()[0].url.as_str(),
        "http://localhost:8000/"
    );
}

#[test]
fn runtime_status_tests_health_probe_surfaces_transport_failure() {
    let harness = common::harness();
    harness.transport.push_network_error("connection refused");

    assert!(harness.studio.health().is_err());
}
