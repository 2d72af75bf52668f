//! Integration tests for request/response validation at the API boundary.

use content_studio_contract::{
    ContentRequest, ContentResponse, ContractError, ContractValidator, Endpoint, ImageRequest,
    LoginRequest, LoginResponse,
};
use content_studio_core::{Level, RequestField};

fn validator() -> ContractValidator {
    ContractValidator::new().expect("schemas should compile")
}

#[test]
fn boundary_validation_tests_accepts_complete_generate_request() {
    let mut request = ContentRequest {
        level: Level::Studio,
        ..ContentRequest::default()
    };
    request.set_field(RequestField::BrandName, "TechStart Inc.");
    request.set_field(RequestField::Topic, "Hiring interns");

    let body = validator()
        .encode_request(Endpoint::Generate, &request)
        .expect("complete request should pass");
    assert_eq!(body["level"], 2);
    assert_eq!(body["art_style"], "Photorealistic");
}

#[test]
fn boundary_validation_tests_rejects_blank_brand_before_sending() {
    let mut request = ContentRequest::default();
    request.set_field(RequestField::Topic, "Hiring interns");

    let result = validator().encode_request(Endpoint::Generate, &request);
    assert!(matches!(result, Err(ContractError::Violation { .. })));
}

#[test]
fn boundary_validation_tests_rejects_empty_image_prompt() {
    let result = validator().encode_request(
        Endpoint::GenerateImage,
        &ImageRequest {
            prompt: String::new(),
        },
    );
    assert!(result.is_err());
}

#[test]
fn boundary_validation_tests_decodes_login_and_generate_replies() {
    let validator = validator();
    let login: LoginResponse = validator
        .decode_response(
            Endpoint::Login,
            r#"{"access_token":"T","token_type":"bearer","username":"A"}"#,
        )
        .expect("login reply should decode");
    assert_eq!(login.access_token, "T");
    assert_eq!(login.token_type.as_deref(), Some("bearer"));

    let generated: ContentResponse = validator
        .decode_response(
            Endpoint::Generate,
            r#"{"script":"Hello","visual_prompt":"A cup","image_url":null}"#,
        )
        .expect("generate reply should decode");
    assert_eq!(generated.image_url, None);

    let encoded = validator
        .encode_request(
            Endpoint::Login,
            &LoginRequest {
                email: "a@b.com".to_string(),
                password: "x".to_string(),
            },
        )
        .expect("login request should encode");
    assert_eq!(encoded, serde_json::json!({"email": "a@b.com", "password": "x"}));
}

#[test]
fn boundary_validation_tests_rejects_generate_reply_without_script() {
    let result: Result<ContentResponse, _> =
        validator().decode_response(Endpoint::Generate, r#"{"visual_prompt":"A cup"}"#);
    assert!(matches!(result, Err(ContractError::Violation { .. })));
}
