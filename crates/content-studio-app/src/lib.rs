#![warn(missing_docs)]
//! # content-studio-app
//!
//! ## Purpose
//! Orchestrates session, API, routing and screen state for `content-studio`.
//!
//! ## Responsibilities
//! - Resolve every navigation through the session guard.
//! - Drive auth, generation and image requests from the screen models through
//!   the API client and hand outcomes back to the screens.
//! - Hold the single transient generation result for `/result`.
//! - Load runtime configuration and install file logging.
//!
//! ## Data flow
//! Screen begins a submission -> [`ContentStudio`] calls the API -> the
//! outcome is applied to the screen -> success moves the current route
//! (login -> dashboard, generate -> result).
//!
//! ## Ownership and lifetimes
//! [`ContentStudio`] owns the API client, the shared session store handle and
//! the cached response. Screens are owned by the caller and borrowed mutably
//! for the duration of one submission.
//!
//! ## Error model
//! Request failures become screen state. Only illegal screen transitions,
//! session storage failures and setup problems surface as [`AppError`].
//!
//! ## Security and privacy notes
//! - Session tokens are never logged.
//! - Log redaction helpers strip token/credential strings.
//! - `/generate-image` goes out without credentials unless configured.

pub mod clipboard;
pub mod config;
pub mod telemetry;

use std::sync::Arc;

use content_studio_api::{ApiClient, ApiError, ReqwestTransport};
use content_studio_auth::{
    AUTH_FAILURE_FALLBACK, AuthError, AuthSubmission, FileSessionStore, Session, SessionStore,
};
use content_studio_contract::{HealthResponse, ImageRequest};
use content_studio_core::ContentResponse;
use content_studio_ui::{
    AuthOutcome, AuthScreen, DashboardScreen, ImageGeneratorScreen, ImageView, Navigation,
    ResultScreen, Route, UiError, resolve_route,
};
use rand::Rng;
use thiserror::Error;

use crate::config::{AppConfig, ConfigError};

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("CONTENT_STUDIO_VERSION");

/// Shown after `Generation failed: ` when the server gives no detail.
pub const GENERATE_FAILURE_FALLBACK: &str = "API Error";

/// Shown on the image screen when the server gives no detail.
pub const IMAGE_FAILURE_FALLBACK: &str = "Generation failed";

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Flat snapshot of the client state for the `status` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeStatus {
    /// Application version.
    pub version: String,
    /// Normalized API base URL.
    pub api_base_url: String,
    /// Whether a session token is stored.
    pub signed_in: bool,
    /// Stored display name.
    pub username: Option<String>,
    /// Current route path.
    pub route: String,
    /// Whether a generation result is held in memory.
    pub result_cached: bool,
}

/// Top-level client: one API client, one session, one current route.
pub struct ContentStudio {
    api: ApiClient,
    session: Arc<dyn SessionStore>,
    route: Route,
    last_response: Option<ContentResponse>,
    authenticate_image_requests: bool,
}

impl ContentStudio {
    /// Creates the client from already-built parts. Starts at `/`.
    pub fn new(api: ApiClient, session: Arc<dyn SessionStore>) -> Self {
        Self {
            api,
            session,
            route: Route::Root,
            last_response: None,
            authenticate_image_requests: false,
        }
    }

    /// Builds the HTTP transport and file-backed session store described by
    /// `config`.
    ///
    /// # Errors
    /// Returns [`AppError::Config`] when no session location can be found,
    /// [`AppError::Auth`] when the session file is unreadable and
    /// [`AppError::Api`] for an unusable base URL.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let transport = Arc::new(ReqwestTransport::new()?);
        let api = ApiClient::new(&config.api_base_url, transport)?;
        let session = Arc::new(FileSessionStore::open(config.session_path()?)?);

        Ok(Self::new(api, session)
            .with_image_authentication(config.authenticate_image_requests))
    }

    /// Attaches the stored token to `/generate-image` requests when `enabled`.
    pub fn with_image_authentication(mut self, enabled: bool) -> Self {
        self.authenticate_image_requests = enabled;
        self
    }

    /// API client in use.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Shared session store.
    pub fn session(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    /// Route currently shown.
    pub fn route(&self) -> Route {
        self.route
    }

    /// Generation result held in memory, if any.
    pub fn last_response(&self) -> Option<&ContentResponse> {
        self.last_response.as_ref()
    }

    /// Navigates to `path`, applying the guard and the result check.
    pub fn navigate(&mut self, path: &str) -> Navigation {
        let requested = Route::parse(path);
        let navigation = resolve_route(
            requested,
            self.session.as_ref(),
            self.last_response.is_some(),
        );
        if navigation.redirected() {
            tracing::info!(from = %navigation.requested, to = %navigation.resolved, "navigation redirected");
        }
        self.route = navigation.resolved;
        navigation
    }

    /// Submits the auth form.
    ///
    /// Login success stores the session and opens `/dashboard`. Register
    /// success leaves the screen in login mode on `/login`. Failures are shown
    /// inline on `screen`.
    ///
    /// # Errors
    /// Returns [`AppError::Ui`] for blank fields or a submission already in
    /// flight.
    pub fn submit_auth(&mut self, screen: &mut AuthScreen) -> Result<AuthOutcome, AppError> {
        let submission = screen.begin_submit()?;

        let outcome = match submission {
            AuthSubmission::Login(request) => match self.api.login(&request) {
                Ok(response) => self
                    .session
                    .set_session(&Session::new(response.access_token, response.username))
                    .map_err(|error| error.to_string()),
                Err(error) => Err(error.user_message(AUTH_FAILURE_FALLBACK)),
            },
            AuthSubmission::Register(request) => self
                .api
                .register(&request)
                .map(|_| ())
                .map_err(|error| error.user_message(AUTH_FAILURE_FALLBACK)),
        };

        let outcome = screen.finish_submit(outcome)?;
        match outcome {
            AuthOutcome::LoggedIn => {
                tracing::info!("signed in");
                self.navigate(Route::Dashboard.path());
            }
            AuthOutcome::Registered => {
                tracing::info!("account registered");
                self.navigate(Route::Login.path());
            }
            AuthOutcome::Failed => {
                tracing::info!("authentication failed");
            }
        }
        Ok(outcome)
    }

    /// Submits the configuration form to `/generate`.
    ///
    /// Success caches the response and opens `/result`; failure raises the
    /// dashboard alert. Returns `true` on success.
    ///
    /// # Errors
    /// Returns [`AppError::Ui`] for blank required fields or a submission
    /// already in flight.
    pub fn generate<R: Rng>(&mut self, screen: &mut DashboardScreen<R>) -> Result<bool, AppError> {
        let api = &self.api;
        let mut received = None;
        let succeeded = screen.submit(|request| {
            api.generate(&request)
                .map(|response| received = Some(response))
                .map_err(|error| error.user_message(GENERATE_FAILURE_FALLBACK))
        })?;

        if let Some(response) = received {
            tracing::info!(level = screen.level().number(), "content generated");
            self.last_response = Some(response);
            self.navigate(Route::Result.path());
        }
        Ok(succeeded)
    }

    /// Result screen for the cached response.
    pub fn result_screen(&self) -> Option<ResultScreen> {
        self.last_response.clone().map(ResultScreen::new)
    }

    /// Submits the image prompt to `/generate-image` and renders the payload
    /// as a `data:` URI.
    ///
    /// # Errors
    /// Returns [`AppError::Ui`] for a blank prompt or a submission already in
    /// flight.
    pub fn generate_image(&mut self, screen: &mut ImageGeneratorScreen) -> Result<(), AppError> {
        let prompt = screen.begin_submit()?;

        let token = self.session.token();
        let bearer = if self.authenticate_image_requests {
            token.as_deref()
        } else {
            if token.is_some() {
                tracing::debug!("image request sent without credentials");
            }
            None
        };

        let outcome = self
            .api
            .generate_image(&ImageRequest { prompt }, bearer)
            .map(|image| ImageView {
                src: image.data_uri(),
            })
            .map_err(|error| error.user_message(IMAGE_FAILURE_FALLBACK));
        if let Err(message) = &outcome {
            tracing::info!(%message, "image generation failed");
        }

        screen.finish_submit(outcome)?;
        Ok(())
    }

    /// Clears the session and the cached result, then opens `/login`.
    ///
    /// # Errors
    /// Returns [`AppError::Auth`] when the session cannot be removed.
    pub fn logout(&mut self) -> Result<Navigation, AppError> {
        self.session.clear()?;
        self.last_response = None;
        tracing::info!("signed out");
        Ok(self.navigate(Route::Login.path()))
    }

    /// Probes `GET /`.
    ///
    /// # Errors
    /// Returns [`AppError::Api`] when the backend is unreachable or answers
    /// unexpectedly.
    pub fn health(&self) -> Result<HealthResponse, AppError> {
        Ok(self.api.health()?)
    }

    /// Snapshot of the client state.
    pub fn status(&self) -> RuntimeStatus {
        RuntimeStatus {
            version: app_version().to_string(),
            api_base_url: self.api.base_url().to_string(),
            signed_in: self.session.has_token(),
            username: self.session.username(),
            route: self.route.path().to_string(),
            result_cached: self.last_response.is_some(),
        }
    }
}

/// Redacts common secret markers in log-safe output.
///
/// Everything from the first marker onward is replaced.
pub fn redact_sensitive(input: &str) -> String {
    let lower = input.to_ascii_lowercase();
    let first = ["password", "token", "authorization", "bearer"]
        .into_iter()
        .filter_map(|key| lower.find(key).map(|position| (position, key)))
        .min_by_key(|(position, _)| *position);

    match first {
        Some((position, key)) => format!("{}{key}=<redacted>", &input[..position]),
        None => input.to_string(),
    }
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Session storage or form error.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),
    /// API client error.
    #[error("api error: {0}")]
    Api(#[from] ApiError),
    /// Screen transition error.
    #[error("ui error: {0}")]
    Ui(#[from] UiError),
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// Logging could not be installed.
    #[error("telemetry error: {0}")]
    Telemetry(String),
    /// Clipboard or output file failure.
    #[error("output error: {0}")]
    Output(String),
}

#[cfg(test)]
mod tests {
    //! Unit tests for log redaction edge cases.

    use super::*;

    #[test]
    fn redaction_cuts_at_earliest_marker() {
        let redacted = redact_sensitive("user=a token=abc password=xyz");
        assert_eq!(redacted, "user=a token=<redacted>");
    }

    #[test]
    fn redaction_keeps_clean_text() {
        assert_eq!(redact_sensitive("POST /generate 200"), "POST /generate 200");
    }
}
