//! Validates contract fixtures against frozen JSON schemas.

use jsonschema::JSONSchema;
use serde_json::{Value, json};

const CONTRACTS: [&str; 9] = [
    "login-request",
    "login-response",
    "register-request",
    "register-response",
    "generate-request",
    "generate-response",
    "generate-image-request",
    "generate-image-response",
    "health-response",
];

fn contracts_dir() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../contracts").to_string()
}

fn load_json(path: &str) -> Value {
    let raw = std::fs::read_to_string(path).expect("json file should be readable");
    serde_json::from_str(&raw).expect("json file should be valid")
}

fn compile_validator(name: &str) -> JSONSchema {
    let schema = load_json(&format!("{}/{name}.schema.json", contracts_dir()));
    JSONSchema::compile(&schema).expect("schema should compile")
}

fn fixture(name: &str) -> Value {
    load_json(&format!("{}/fixtures/{name}.valid.json", contracts_dir()))
}

#[test]
fn every_fixture_matches_its_schema() {
    for name in CONTRACTS {
        let validator = compile_validator(name);
        assert!(
            validator.is_valid(&fixture(name)),
            "{name} fixture should validate against schema"
        );
    }
}

#[test]
fn generate_request_rejects_out_of_range_level() {
    let validator = compile_validator("generate-request");
    let mut request = fixture("generate-request");
    request["level"] = json!(4);

    assert!(!validator.is_valid(&request));
}

#[test]
fn generate_request_rejects_blank_brand_name() {
    let validator = compile_validator("generate-request");
    let mut request = fixture("generate-request");
    request["brand_name"] = json!("");

    assert!(!validator.is_valid(&request));
}

#[test]
fn login_request_rejects_unknown_fields() {
    let validator = compile_validator("login-request");
    let request = json!({"email": "a@b.com", "password": "x", "remember": true});

    assert!(!validator.is_valid(&request));
}

#[test]
fn login_response_requires_token() {
    let validator = compile_validator("login-response");

    assert!(!validator.is_valid(&json!({"username": "A"})));
}

#[test]
fn image_response_accepts_empty_object() {
    let validator = compile_validator("generate-image-response");

    assert!(validator.is_valid(&json!({})));
    assert!(validator.is_valid(&json!({"image_base64": null})));
}
