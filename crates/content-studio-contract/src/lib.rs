#![warn(missing_docs)]
//! # content-studio-contract
//!
//! ## Purpose
//! Defines the wire schema of every content-studio API endpoint and validates
//! payloads against it at the client boundary.
//!
//! ## Responsibilities
//! - Declare typed request/response bodies for `/login`, `/register`,
//!   `/generate`, `/generate-image` and the `/` health probe.
//! - Compile the frozen JSON Schemas under `contracts/` once and check
//!   outbound bodies before sending and inbound bodies before use.
//! - Extract the server `detail` message from error bodies.
//!
//! ## Data flow
//! Typed request -> [`ContractValidator::encode_request`] -> JSON on the wire.
//! Raw response text -> [`ContractValidator::decode_response`] -> typed
//! response.
//!
//! ## Ownership and lifetimes
//! Decoded values are owned structs so nothing borrows from transient network
//! buffers.
//!
//! ## Error model
//! Invalid JSON, schema violations and schema compilation failures return
//! [`ContractError`].
//!
//! ## Security and privacy notes
//! Violation messages may quote payload values; callers pass them through
//! redaction before logging.

use std::collections::HashMap;
use std::fmt;

use jsonschema::JSONSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use content_studio_core::{ContentRequest, ContentResponse};

const LOGIN_REQUEST_SCHEMA: &str = include_str!("../../../contracts/login-request.schema.json");
const LOGIN_RESPONSE_SCHEMA: &str = include_str!("../../../contracts/login-response.schema.json");
const REGISTER_REQUEST_SCHEMA: &str =
    include_str!("../../../contracts/register-request.schema.json");
const REGISTER_RESPONSE_SCHEMA: &str =
    include_str!("../../../contracts/register-response.schema.json");
const GENERATE_REQUEST_SCHEMA: &str =
    include_str!("../../../contracts/generate-request.schema.json");
const GENERATE_RESPONSE_SCHEMA: &str =
    include_str!("../../../contracts/generate-response.schema.json");
const IMAGE_REQUEST_SCHEMA: &str =
    include_str!("../../../contracts/generate-image-request.schema.json");
const IMAGE_RESPONSE_SCHEMA: &str =
    include_str!("../../../contracts/generate-image-response.schema.json");
const HEALTH_RESPONSE_SCHEMA: &str = include_str!("../../../contracts/health-response.schema.json");

/// Body of `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Successful `POST /login` reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque session token.
    pub access_token: String,
    /// Display name of the account.
    pub username: String,
    /// Token scheme reported by the server, usually `bearer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// Body of `POST /register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Desired display name.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Successful `POST /register` reply. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Confirmation text.
    #[serde(default)]
    pub message: Option<String>,
    /// Registered username echoed back.
    #[serde(default)]
    pub user: Option<String>,
}

/// Body of `POST /generate-image`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Free-text description of the image.
    pub prompt: String,
}

/// Successful `POST /generate-image` reply.
///
/// The payload is optional at the schema level so an empty object decodes;
/// callers treat a missing payload as a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResponse {
    /// Base64-encoded JPEG bytes.
    #[serde(default)]
    pub image_base64: Option<String>,
}

/// `GET /` health reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Server status text.
    pub message: String,
}

/// HTTP method used by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

/// API endpoint with a frozen contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `POST /login`
    Login,
    /// `POST /register`
    Register,
    /// `POST /generate`
    Generate,
    /// `POST /generate-image`
    GenerateImage,
    /// `GET /`
    Health,
}

impl Endpoint {
    /// Every endpoint.
    pub const ALL: [Endpoint; 5] = [
        Endpoint::Login,
        Endpoint::Register,
        Endpoint::Generate,
        Endpoint::GenerateImage,
        Endpoint::Health,
    ];

    /// Path relative to the API base URL, without a leading slash.
    pub fn relative_path(self) -> &'static str {
        match self {
            Endpoint::Login => "login",
            Endpoint::Register => "register",
            Endpoint::Generate => "generate",
            Endpoint::GenerateImage => "generate-image",
            Endpoint::Health => "",
        }
    }

    /// HTTP method.
    pub fn method(self) -> Method {
        match self {
            Endpoint::Health => Method::Get,
            _ => Method::Post,
        }
    }

    fn schema_source(self, direction: Direction) -> Option<&'static str> {
        match (self, direction) {
            (Endpoint::Login, Direction::Request) => Some(LOGIN_REQUEST_SCHEMA),
            (Endpoint::Login, Direction::Response) => Some(LOGIN_RESPONSE_SCHEMA),
            (Endpoint::Register, Direction::Request) => Some(REGISTER_REQUEST_SCHEMA),
            (Endpoint::Register, Direction::Response) => Some(REGISTER_RESPONSE_SCHEMA),
            (Endpoint::Generate, Direction::Request) => Some(GENERATE_REQUEST_SCHEMA),
            (Endpoint::Generate, Direction::Response) => Some(GENERATE_RESPONSE_SCHEMA),
            (Endpoint::GenerateImage, Direction::Request) => Some(IMAGE_REQUEST_SCHEMA),
            (Endpoint::GenerateImage, Direction::Response) => Some(IMAGE_RESPONSE_SCHEMA),
            (Endpoint::Health, Direction::Request) => None,
            (Endpoint::Health, Direction::Response) => Some(HEALTH_RESPONSE_SCHEMA),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self.method() {
            Method::Get => "GET",
            Method::Post => "POST",
        };
        write!(f, "{method} /{}", self.relative_path())
    }
}

/// Which side of an exchange a payload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Client to server.
    Request,
    /// Server to client.
    Response,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Request => f.write_str("request"),
            Direction::Response => f.write_str("response"),
        }
    }
}

/// Compiled schemas for every endpoint.
pub struct ContractValidator {
    schemas: HashMap<(Endpoint, Direction), JSONSchema>,
}

impl ContractValidator {
    /// Compiles all frozen schemas.
    ///
    /// # Errors
    /// Returns [`ContractError::Schema`] when a schema is not valid JSON or
    /// not a valid JSON Schema document.
    pub fn new() -> Result<Self, ContractError> {
        let mut schemas = HashMap::new();
        for endpoint in Endpoint::ALL {
            for direction in [Direction::Request, Direction::Response] {
                let Some(source) = endpoint.schema_source(direction) else {
                    continue;
                };
                schemas.insert((endpoint, direction), compile(endpoint, direction, source)?);
            }
        }

        Ok(Self { schemas })
    }

    /// Checks `value` against the schema for `endpoint`/`direction`.
    ///
    /// Exchanges without a schema (the bodiless health request) always pass.
    ///
    /// # Errors
    /// Returns [`ContractError::Violation`] listing every failed constraint.
    pub fn validate(
        &self,
        endpoint: Endpoint,
        direction: Direction,
        value: &Value,
    ) -> Result<(), ContractError> {
        let Some(schema) = self.schemas.get(&(endpoint, direction)) else {
            return Ok(());
        };

        if let Err(errors) = schema.validate(value) {
            let details: Vec<String> = errors.map(|error| error.to_string()).collect();
            return Err(ContractError::Violation {
                endpoint,
                direction,
                details: details.join("; "),
            });
        }

        Ok(())
    }

    /// Serializes and validates an outbound body.
    ///
    /// # Errors
    /// Returns [`ContractError::Decode`] when serialization fails and
    /// [`ContractError::Violation`] when the body breaks the contract.
    pub fn encode_request<T: Serialize>(
        &self,
        endpoint: Endpoint,
        body: &T,
    ) -> Result<Value, ContractError> {
        let value = serde_json::to_value(body)?;
        self.validate(endpoint, Direction::Request, &value)?;
        Ok(value)
    }

    /// Parses and validates a successful response body.
    ///
    /// # Errors
    /// Returns [`ContractError::Decode`] for invalid JSON and
    /// [`ContractError::Violation`] when the body breaks the contract.
    pub fn decode_response<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        raw: &str,
    ) -> Result<T, ContractError> {
        let value: Value = serde_json::from_str(raw)?;
        self.validate(endpoint, Direction::Response, &value)?;
        Ok(serde_json::from_value(value)?)
    }
}

impl fmt::Debug for ContractValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractValidator")
            .field("schemas", &self.schemas.len())
            .finish()
    }
}

fn compile(
    endpoint: Endpoint,
    direction: Direction,
    source: &str,
) -> Result<JSONSchema, ContractError> {
    let document: Value = serde_json::from_str(source).map_err(|error| ContractError::Schema {
        endpoint,
        direction,
        message: error.to_string(),
    })?;

    JSONSchema::compile(&document).map_err(|error| ContractError::Schema {
        endpoint,
        direction,
        message: error.to_string(),
    })
}

/// Extracts the human-readable `detail` from an error body.
///
/// String details are returned verbatim; structured details (for example a
/// list of field errors) are returned as compact JSON. Blank, null or
/// missing details yield `None` so callers fall back to a generic message.
pub fn error_detail(raw: &str) -> Option<String> {
    let body: Value = serde_json::from_str(raw).ok()?;
    match body.get("detail")? {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Contract errors.
#[derive(Debug, Error)]
pub enum ContractError {
    /// JSON encode/decode failure.
    #[error("contract decode failure: {0}")]
    Decode(#[from] serde_json::Error),
    /// Payload violates the frozen schema.
    #[error("{endpoint} {direction} violates contract: {details}")]
    Violation {
        /// Endpoint whose contract failed.
        endpoint: Endpoint,
        /// Side of the exchange.
        direction: Direction,
        /// Joined validator messages.
        details: String,
    },
    /// A frozen schema could not be compiled.
    #[error("{endpoint} {direction} schema is invalid: {message}")]
    Schema {
        /// Endpoint owning the schema.
        endpoint: Endpoint,
        /// Side of the exchange.
        direction: Direction,
        /// Compiler message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    //! Unit tests for schema compilation and detail extraction.

    use serde_json::json;

    use super::*;

    #[test]
    fn all_frozen_schemas_compile() {
        let validator = ContractValidator::new().expect("schemas should compile");
        assert_eq!(validator.schemas.len(), 9);
    }

    #[test]
    fn image_response_without_payload_still_decodes() {
        let validator = ContractValidator::new().expect("schemas should compile");
        let response: ImageResponse = validator
            .decode_response(Endpoint::GenerateImage, "{}")
            .expect("empty object should decode");
        assert_eq!(response.image_base64, None);
    }

    #[test]
    fn login_response_requires_token() {
        let validator = ContractValidator::new().expect("schemas should compile");
        let result = validator.validate(
            Endpoint::Login,
            Direction::Response,
            &json!({ "username": "A" }),
        );
        assert!(matches!(result, Err(ContractError::Violation { .. })));
    }

    #[test]
    fn detail_extraction_handles_strings_and_structures() {
        assert_eq!(
            error_detail(r#"{"detail":"Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(
            error_detail(r#"{"detail":[{"msg":"field required"}]}"#).as_deref(),
            Some(r#"[{"msg":"field required"}]"#)
        );
        assert_eq!(error_detail(r#"{"detail":""}"#), None);
        assert_eq!(error_detail("not json"), None);
    }

    #[test]
    fn endpoint_display_names_method_and_path() {
        assert_eq!(Endpoint::GenerateImage.to_string(), "POST /generate-image");
        assert_eq!(Endpoint::Health.to_string(), "GET /");
    }
}
