//! Integration tests for dashboard generation and the result route.

mod common;

use content_studio_core::{Level, RequestField};
use content_studio_ui::{ImageSlot, ResultField, Route};

const RESPONSE: &str =
    r#"{"script":"Warm up with pumpkin lattes","visual_prompt":"Steaming mug on oak","image_url":null}"#;

#[test]
fn generation_flow_tests_success_caches_response_and_opens_result() {
    let mut harness = common::signed_in_harness();
    harness.transport.push_reply(200, RESPONSE);
    let mut screen = common::filled_dashboard();

    let succeeded = harness
        .studio
        .generate(&mut screen)
        .expect("generate should run");

    assert!(succeeded);
    assert_eq!(harness.studio.route(), Route::Result);
    let result = harness
        .studio
        .result_screen()
        .expect("result should be cached");
    assert_eq!(result.text(ResultField::Script), "Warm up with pumpkin lattes");
    assert_eq!(result.image(), ImageSlot::Placeholder);
    assert_eq!(harness.studio.navigate("/result").resolved, Route::Result);
}

#[test]
fn generation_flow_tests_sends_every_field_and_level() {
    let mut harness = common::signed_in_harness();
    harness.transport.push_reply(200, RESPONSE);
    let mut screen = common::filled_dashboard();
    screen.set_level(Level::Director);
    screen.set_level(Level::Quick);

    harness
        .studio
        .generate(&mut screen)
        .expect("generate should run");

    let requests = harness.transport.requests();
    let body = requests[0].body.as_ref().expect("generate should send a body");
    let object = body.as_object().expect("body should be an object");
    assert_eq!(object.len(), RequestField::ALL.len() + 1);
    assert_eq!(body["level"], 1);
    assert_eq!(body["brand_name"], "Acme Coffee");
    assert_eq!(body["tone"], "Modern");
    let palette = body["color_palette"]
        .as_str()
        .expect("palette should be a string");
    assert_eq!(palette.split(", ").count(), 5);
}

#[test]
fn generation_flow_tests_failure_raises_alert_and_stays_on_dashboard() {
    let mut harness = common::signed_in_harness();
    harness.transport.push_reply(500, "oops");
    let mut screen = common::filled_dashboard();
    harness.studio.navigate("/dashboard");

    let succeeded = harness
        .studio
        .generate(&mut screen)
        .expect("generate should run");

    assert!(!succeeded);
    assert_eq!(screen.alert(), Some("Generation failed: API Error"));
    assert_eq!(harness.studio.route(), Route::Dashboard);
    assert!(harness.studio.last_response().is_none());
}

#[test]
fn generation_flow_tests_server_detail_reaches_the_alert() {
    let mut harness = common::signed_in_harness();
    harness
        .transport
        .push_reply(429, r#"{"detail":"Quota exceeded"}"#);
    let mut screen = common::filled_dashboard();

    harness
        .studio
        .generate(&mut screen)
        .expect("generate should run");

    assert_eq!(screen.alert(), Some("Generation failed: Quota exceeded"));
}

#[test]
fn generation_flow_tests_result_without_response_returns_to_dashboard() {
    let mut harness = common::signed_in_harness();
    let navigation = harness.studio.navigate("/result");

    assert!(navigation.redirected());
    assert_eq!(navigation.resolved, Route::Dashboard);
}

#[test]
fn generation_flow_tests_signed_out_navigation_goes_to_login() {
    let mut harness = common::harness();
    for path in ["/dashboard", "/result", "/image-generator", "/"] {
        assert_eq!(harness.studio.navigate(path).resolved, Route::Login, "{path}");
    }
    assert_eq!(harness.studio.navigate("/register").resolved, Route::Register);
}
