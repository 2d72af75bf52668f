#![warn(missing_docs)]
//! # content-studio-api
//!
//! ## Purpose
//! Typed HTTP client for the content-generation service.
//!
//! ## Responsibilities
//! - Validate and normalize the API base URL.
//! - Execute the five endpoint calls through an injectable [`ApiTransport`].
//! - Check every outbound and inbound body against the frozen contracts.
//! - Classify failures into server, transport, missing-data and contract
//!   errors and turn them into display text.
//!
//! ## Data flow
//! Typed request -> contract check -> [`ApiRequest`] -> [`ApiTransport::send`]
//! -> [`HttpReply`] -> status check (`detail` extraction on failure) ->
//! contract check -> typed response.
//!
//! ## Ownership and lifetimes
//! Requests and replies own their buffers. [`ApiClient`] is cheap to clone;
//! transport and compiled contracts sit behind `Arc`.
//!
//! ## Error model
//! Every failure is an [`ApiError`]. Nothing is retried; callers decide what
//! to display via [`ApiError::user_message`].
//!
//! ## Security and privacy notes
//! Request bodies and bearer tokens are never logged; only endpoint, URL and
//! status are traced.

use std::sync::Arc;

use base64::Engine as _;
use content_studio_contract::{
    ContractError, ContractValidator, Endpoint, HealthResponse, ImageRequest, ImageResponse,
    LoginRequest, LoginResponse, Method, RegisterRequest, RegisterResponse, error_detail,
};
use content_studio_core::{ContentRequest, ContentResponse};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use url::Url;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

/// Base URL used when nothing overrides it.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Prefix turning a base64 JPEG payload into an image source.
pub const IMAGE_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Failure text when `/generate-image` answers without a payload.
pub const MISSING_IMAGE_MESSAGE: &str = "No image data received";

/// One outbound call handed to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Target endpoint.
    pub endpoint: Endpoint,
    /// Absolute URL.
    pub url: Url,
    /// Contract-checked JSON body, `None` for `GET`.
    pub body: Option<Value>,
    /// Token to send as `Authorization: Bearer`.
    pub bearer_token: Option<String>,
}

/// Raw status and body returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

impl HttpReply {
    /// Creates a reply.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstract transport used by [`ApiClient`].
pub trait ApiTransport: Send + Sync {
    /// Performs one HTTP exchange.
    ///
    /// # Errors
    /// Returns [`ApiError::Network`] when no HTTP reply was obtained. Non-2xx
    /// replies are not errors at this layer.
    fn send(&self, request: &ApiRequest) -> Result<HttpReply, ApiError>;
}

/// Blocking `reqwest` transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Builds a transport with the crate user agent.
    ///
    /// No request timeout is configured: a hung server keeps the call
    /// pending until the connection drops.
    ///
    /// # Errors
    /// Returns [`ApiError::Network`] when the TLS backend cannot initialize.
    pub fn new() -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("content-studio/", env!("CARGO_PKG_VERSION")))
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|error| ApiError::Network(format!("http client setup failed: {error}")))?;
        Ok(Self { client })
    }
}

impl ApiTransport for ReqwestTransport {
    fn send(&self, request: &ApiRequest) -> Result<HttpReply, ApiError> {
        let mut builder = match request.endpoint.method() {
            Method::Get => self.client.get(request.url.clone()),
            Method::Post => self.client.post(request.url.clone()),
        };
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .map_err(|error| ApiError::Network(error.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|error| ApiError::Network(format!("reading response failed: {error}")))?;

        Ok(HttpReply { status, body })
    }
}

/// A successfully generated image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    base64: String,
}

impl GeneratedImage {
    /// Wraps a base64 JPEG payload.
    pub fn new(base64: impl Into<String>) -> Self {
        Self {
            base64: base64.into(),
        }
    }

    /// Raw base64 payload.
    pub fn base64(&self) -> &str {
        &self.base64
    }

    /// `data:` URI usable as an image source.
    pub fn data_uri(&self) -> String {
        format!("{IMAGE_DATA_URI_PREFIX}{}", self.base64)
    }

    /// Decodes the payload to JPEG bytes.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidImage`] when the payload is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, ApiError> {
        base64::engine::general_purpose::STANDARD
            .decode(self.base64.trim())
            .map_err(|error| ApiError::InvalidImage(error.to_string()))
    }
}

/// Client for every content-studio endpoint.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    transport: Arc<dyn ApiTransport>,
    contracts: Arc<ContractValidator>,
}

impl ApiClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidBaseUrl`] for unusable URLs and
    /// [`ApiError::Contract`] when the frozen schemas fail to compile.
    pub fn new(base_url: &str, transport: Arc<dyn ApiTransport>) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            transport,
            contracts: Arc::new(ContractValidator::new()?),
        })
    }

    /// Normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /login`.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.call(Endpoint::Login, Some(request), None)
    }

    /// `POST /register`.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.call(Endpoint::Register, Some(request), None)
    }

    /// `POST /generate` with every field of `request` plus its level.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub fn generate(&self, request: &ContentRequest) -> Result<ContentResponse, ApiError> {
        self.call(Endpoint::Generate, Some(request), None)
    }

    /// `POST /generate-image`.
    ///
    /// `bearer_token` is attached only when given; the endpoint itself does
    /// not require it.
    ///
    /// # Errors
    /// Returns [`ApiError::MissingData`] when the reply has no (or an empty)
    /// `image_base64`, otherwise see [`ApiError`].
    pub fn generate_image(
        &self,
        request: &ImageRequest,
        bearer_token: Option<&str>,
    ) -> Result<GeneratedImage, ApiError> {
        let response: ImageResponse =
            self.call(Endpoint::GenerateImage, Some(request), bearer_token)?;

        match response.image_base64 {
            Some(payload) if !payload.is_empty() => Ok(GeneratedImage::new(payload)),
            _ => Err(ApiError::MissingData(MISSING_IMAGE_MESSAGE)),
        }
    }

    /// `GET /` health probe.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub fn health(&self) -> Result<HealthResponse, ApiError> {
        self.call::<(), _>(Endpoint::Health, None, None)
    }

    fn call<Req, Resp>(
        &self,
        endpoint: Endpoint,
        body: Option<&Req>,
        bearer_token: Option<&str>,
    ) -> Result<Resp, ApiError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let body = body
            .map(|body| self.contracts.encode_request(endpoint, body))
            .transpose()?;
        let url = self
            .base_url
            .join(endpoint.relative_path())
            .map_err(|error| ApiError::InvalidBaseUrl(error.to_string()))?;

        let request = ApiRequest {
            endpoint,
            url,
            body,
            bearer_token: bearer_token.map(str::to_string),
        };
        tracing::debug!(%endpoint, url = %request.url, authenticated = request.bearer_token.is_some(), "sending request");

        let reply = self.transport.send(&request).inspect_err(|error| {
            tracing::warn!(%endpoint, %error, "request did not complete");
        })?;

        if !reply.is_success() {
            let detail = error_detail(&reply.body);
            tracing::info!(%endpoint, status = reply.status, has_detail = detail.is_some(), "request rejected");
            return Err(ApiError::Server {
                status: reply.status,
                detail,
            });
        }

        tracing::debug!(%endpoint, status = reply.status, "request succeeded");
        Ok(self.contracts.decode_response(endpoint, &reply.body)?)
    }
}

/// Parses and normalizes an API base URL.
///
/// The URL must be absolute `http`/`https` without query or fragment; a
/// trailing `/` is appended so endpoint paths join under any base path.
///
/// # Errors
/// Returns [`ApiError::InvalidBaseUrl`] when any rule is broken.
pub fn normalize_base_url(raw: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|error| ApiError::InvalidBaseUrl(format!("{raw}: {error}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidBaseUrl(format!(
            "{raw}: scheme must be http or https"
        )));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ApiError::InvalidBaseUrl(format!("{raw}: missing host")));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ApiError::InvalidBaseUrl(format!(
            "{raw}: query and fragment are not allowed"
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The server answered with a non-2xx status.
    Server,
    /// No HTTP reply was obtained.
    Transport,
    /// A 2xx reply lacked a value the screen needs.
    MissingData,
    /// A body broke the frozen contract.
    Contract,
    /// Client misconfiguration.
    Configuration,
}

/// API client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Base URL is unusable.
    #[error("invalid api base url: {0}")]
    InvalidBaseUrl(String),
    /// Connection or I/O failure.
    #[error("{0}")]
    Network(String),
    /// Non-2xx reply.
    #[error("server returned status {status}")]
    Server {
        /// HTTP status.
        status: u16,
        /// `detail` message from the error body.
        detail: Option<String>,
    },
    /// Required reply value is missing.
    #[error("{0}")]
    MissingData(&'static str),
    /// Contract validation failure.
    #[error(transparent)]
    Contract(#[from] ContractError),
    /// Image payload is not valid base64.
    #[error("invalid image payload: {0}")]
    InvalidImage(String),
}

impl ApiError {
    /// Category of this failure.
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::InvalidBaseUrl(_) => FailureKind::Configuration,
            ApiError::Network(_) => FailureKind::Transport,
            ApiError::Server { .. } => FailureKind::Server,
            ApiError::MissingData(_) => FailureKind::MissingData,
            ApiError::Contract(_) | ApiError::InvalidImage(_) => FailureKind::Contract,
        }
    }

    /// Text a screen displays for this failure.
    ///
    /// Server failures show the `detail` verbatim, or `fallback` when absent.
    /// Transport and missing-data failures show their own message. Contract
    /// failures show `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Server { detail: None, .. } => fallback.to_string(),
            ApiError::Network(message) => message.clone(),
            ApiError::MissingData(message) => (*message).to_string(),
            ApiError::InvalidBaseUrl(_) | ApiError::Contract(_) | ApiError::InvalidImage(_) => {
                fallback.to_string()
            }
        }
    }
}
