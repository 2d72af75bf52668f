//! Integration tests for log redaction.

use content_studio_app::redact_sensitive;

#[test]
fn log_redaction_tests_removes_obvious_secret_markers() {
    let raw = "authorization=Bearer abc123";
    let redacted = redact_sensitive(raw);

    assert!(redacted.contains("<redacted>"));
    assert!(!redacted.contains("abc123"));
}

#[test]
fn log_redaction_tests_hides_passwords_in_error_text() {
    let redacted = redact_sensitive("login failed for a@b.com password hunter2");

    assert!(redacted.starts_with("login failed for a@b.com "));
    assert!(!redacted.contains("hunter2"));
}
