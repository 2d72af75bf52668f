#![warn(missing_docs)]
//! # content-studio-ui
//!
//! ## Purpose
//! Defines the screen state models and client-side routing for
//! `content-studio`.
//!
//! ## Responsibilities
//! - Resolve navigation through the session guard and the transient-result
//!   check ([`resolve_route`]).
//! - Track each screen's request with an explicit lifecycle
//!   ([`RequestLifecycle`]) that rejects resubmission while pending.
//! - Hold the auth, dashboard, result and image-generator screen states.
//!
//! ## Data flow
//! The orchestrator asks a screen to begin a submission, performs the API
//! call, then hands the outcome back to the screen, which updates its inline
//! error, alert, notice or rendered output.
//!
//! ## Ownership and lifetimes
//! Screens own all of their state. Rendering helpers borrow from the screen
//! ([`RevealStep`], [`ImageSlot`]) and never outlive it.
//!
//! ## Error model
//! Illegal transitions and failed field checks return [`UiError`]. Request
//! failures are not errors here; they become displayed state.
//!
//! ## Security and privacy notes
//! Screen state holds the password only while the auth form is open; it is
//! never formatted into messages.

use std::fmt;
use std::time::{Duration, Instant};

use content_studio_auth::{
    AUTH_FAILURE_FALLBACK, AuthError, AuthForm, AuthMode, AuthSubmission, GuardDecision,
    REGISTRATION_NOTICE, SessionGuard, SessionStore,
};
use content_studio_core::{ContentRequest, ContentResponse, CoreError, Level, Palette, RequestField};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// How long a "copied" acknowledgment stays visible.
pub const COPY_ACK_WINDOW: Duration = Duration::from_secs(2);

/// Delay between consecutive words of a staggered reveal.
pub const REVEAL_STEP: Duration = Duration::from_millis(50);

/// Prefix of the blocking alert raised by a failed generation.
pub const GENERATION_ALERT_PREFIX: &str = "Generation failed: ";

/// Client-side navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/login`
    Login,
    /// `/register`
    Register,
    /// `/dashboard`
    Dashboard,
    /// `/result`
    Result,
    /// `/image-generator`
    ImageGenerator,
    /// `/`
    Root,
}

impl Route {
    /// Parses a path. Unknown paths map to [`Route::Root`].
    pub fn parse(path: &str) -> Self {
        match path.trim().trim_end_matches('/') {
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/dashboard" => Route::Dashboard,
            "/result" => Route::Result,
            "/image-generator" => Route::ImageGenerator,
            _ => Route::Root,
        }
    }

    /// Canonical path.
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Result => "/result",
            Route::ImageGenerator => "/image-generator",
            Route::Root => "/",
        }
    }

    /// Returns `true` when the session guard wraps this route.
    pub fn is_protected(self) -> bool {
        matches!(
            self,
            Route::Dashboard | Route::Result | Route::ImageGenerator
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Result of resolving a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    /// Route that was asked for.
    pub requested: Route,
    /// Route that actually renders.
    pub resolved: Route,
}

impl Navigation {
    /// Returns `true` when a redirect happened.
    pub fn redirected(&self) -> bool {
        self.requested != self.resolved
    }
}

/// Resolves `requested` to the route that renders.
///
/// - `/` redirects to `/dashboard`.
/// - Protected routes redirect to `/login` when no token is stored.
/// - `/result` redirects to `/dashboard` when no response is held in memory.
pub fn resolve_route(
    requested: Route,
    session: &dyn SessionStore,
    result_available: bool,
) -> Navigation {
    let mut resolved = match requested {
        Route::Root => Route::Dashboard,
        other => other,
    };

    if resolved.is_protected() && SessionGuard::check(session) == GuardDecision::RedirectToLogin {
        resolved = Route::Login;
    } else if resolved == Route::Result && !result_available {
        resolved = Route::Dashboard;
    }

    Navigation {
        requested,
        resolved,
    }
}

/// Phase of one screen's outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPhase<T> {
    /// Nothing submitted yet.
    Idle,
    /// Waiting for the reply.
    Pending,
    /// Last request succeeded.
    Succeeded(T),
    /// Last request failed with a display message.
    Failed(String),
}

/// `idle -> pending -> (success | failure)` state machine.
///
/// Beginning a request clears the previous outcome. A second submission
/// while one is pending is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLifecycle<T> {
    phase: RequestPhase<T>,
}

impl<T> RequestLifecycle<T> {
    /// Creates an idle lifecycle.
    pub fn new() -> Self {
        Self {
            phase: RequestPhase::Idle,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> &RequestPhase<T> {
        &self.phase
    }

    /// Returns `true` while a request is outstanding.
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, RequestPhase::Pending)
    }

    /// Successful outcome of the last request.
    pub fn success(&self) -> Option<&T> {
        match &self.phase {
            RequestPhase::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// Failure message of the last request.
    pub fn failure(&self) -> Option<&str> {
        match &self.phase {
            RequestPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Moves to `Pending`.
    ///
    /// # Errors
    /// Returns [`UiError::SubmissionInFlight`] when already pending.
    pub fn begin(&mut self) -> Result<(), UiError> {
        if self.is_pending() {
            return Err(UiError::SubmissionInFlight);
        }
        self.phase = RequestPhase::Pending;
        Ok(())
    }

    /// Records the outcome of the pending request.
    ///
    /// # Errors
    /// Returns [`UiError::NotPending`] when no request is outstanding.
    pub fn finish(&mut self, outcome: Result<T, String>) -> Result<(), UiError> {
        if !self.is_pending() {
            return Err(UiError::NotPending);
        }
        self.phase = match outcome {
            Ok(value) => RequestPhase::Succeeded(value),
            Err(message) => RequestPhase::Failed(message),
        };
        Ok(())
    }
}

impl<T> Default for RequestLifecycle<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// What a finished auth submission did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Login succeeded; the session is stored and the dashboard opens.
    LoggedIn,
    /// Registration succeeded; the screen switched to login mode.
    Registered,
    /// The request failed; the screen shows the message inline.
    Failed,
}

/// Login/registration screen.
#[derive(Debug, Clone, Default)]
pub struct AuthScreen {
    mode: AuthMode,
    /// Form inputs.
    pub form: AuthForm,
    request: RequestLifecycle<()>,
    notice: Option<String>,
}

impl AuthScreen {
    /// Creates the screen in `mode`.
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Screen for the `/login` or `/register` route.
    pub fn for_route(route: Route) -> Self {
        match route {
            Route::Register => Self::new(AuthMode::Register),
            _ => Self::new(AuthMode::Login),
        }
    }

    /// Current mode.
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Switches between login and register, dropping stale messages.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.notice = None;
        if !self.request.is_pending() {
            self.request = RequestLifecycle::new();
        }
    }

    /// Inline error from the last submission.
    pub fn error(&self) -> Option<&str> {
        self.request.failure()
    }

    /// Success notice (shown after registering).
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Returns `true` while the submit control is disabled.
    pub fn is_loading(&self) -> bool {
        self.request.is_pending()
    }

    /// Checks required fields and moves to `Pending`.
    ///
    /// # Errors
    /// Returns [`UiError::SubmissionInFlight`] while pending and
    /// [`UiError::Auth`] when a required field is blank.
    pub fn begin_submit(&mut self) -> Result<AuthSubmission, UiError> {
        if self.request.is_pending() {
            return Err(UiError::SubmissionInFlight);
        }
        let submission = self.form.submission(self.mode)?;
        self.request.begin()?;
        self.notice = None;
        Ok(submission)
    }

    /// Applies the outcome of the pending submission.
    ///
    /// A failure shows its message, or the generic auth fallback when empty.
    ///
    /// # Errors
    /// Returns [`UiError::NotPending`] when nothing was submitted.
    pub fn finish_submit(&mut self, outcome: Result<(), String>) -> Result<AuthOutcome, UiError> {
        let result = match outcome {
            Ok(()) => {
                self.request.finish(Ok(()))?;
                match self.mode {
                    AuthMode::Login => AuthOutcome::LoggedIn,
                    AuthMode::Register => {
                        self.mode = AuthMode::Login;
                        self.notice = Some(REGISTRATION_NOTICE.to_string());
                        AuthOutcome::Registered
                    }
                }
            }
            Err(message) => {
                let message = if message.trim().is_empty() {
                    AUTH_FAILURE_FALLBACK.to_string()
                } else {
                    message
                };
                self.request.finish(Err(message))?;
                AuthOutcome::Failed
            }
        };

        Ok(result)
    }
}

/// Configuration form with tiered fields and a random palette.
#[derive(Debug, Clone)]
pub struct DashboardScreen<R = StdRng> {
    request: ContentRequest,
    palette: Option<Palette>,
    rng: R,
    submission: RequestLifecycle<()>,
    alert: Option<String>,
}

impl DashboardScreen<StdRng> {
    /// Creates a form seeded from the operating system.
    pub fn with_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> DashboardScreen<R> {
    /// Creates a fresh form at level 1 with default field values.
    pub fn new(rng: R) -> Self {
        Self {
            request: ContentRequest::default(),
            palette: None,
            rng,
            submission: RequestLifecycle::new(),
            alert: None,
        }
    }

    /// Current field values and level.
    pub fn request(&self) -> &ContentRequest {
        &self.request
    }

    /// Selected level.
    pub fn level(&self) -> Level {
        self.request.level
    }

    /// Selects a level.
    ///
    /// Never clears fields. Entering [`Level::Director`] from a lower level
    /// shows the palette affordance, which draws a fresh palette into
    /// `color_palette`.
    pub fn set_level(&mut self, level: Level) {
        let entering_director = level == Level::Director && self.request.level < Level::Director;
        self.request.level = level;
        if entering_director {
            self.regenerate_palette();
        }
    }

    /// Fields shown at the current level.
    pub fn visible_fields(&self) -> Vec<RequestField> {
        RequestField::visible_at(self.request.level).collect()
    }

    /// Writes free text into `field`.
    pub fn set_field(&mut self, field: RequestField, value: impl Into<String>) {
        self.request.set_field(field, value);
    }

    /// Picks one of the offered choices for an enumerated field.
    ///
    /// # Errors
    /// Returns [`UiError::Core`] for values that are not offered.
    pub fn select_option(&mut self, field: RequestField, value: &str) -> Result<(), UiError> {
        Ok(self.request.select_option(field, value)?)
    }

    /// Draws a new palette, replacing the previous one and the
    /// `color_palette` field unconditionally.
    pub fn regenerate_palette(&mut self) -> &Palette {
        let palette = Palette::generate(&mut self.rng);
        self.request
            .set_field(RequestField::ColorPalette, palette.joined());
        self.palette.insert(palette)
    }

    /// Palette currently shown, if the affordance has been displayed.
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Blocking alert raised by the last failed submission.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Dismisses the blocking alert.
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Returns `true` while the submit control is disabled.
    pub fn is_loading(&self) -> bool {
        self.submission.is_pending()
    }

    /// Submits every field plus the level through `submit`.
    ///
    /// `submit` signals failure by returning `Err`; the error text becomes
    /// the blocking alert `"Generation failed: <error>"`. Returns `true` when
    /// `submit` succeeded.
    ///
    /// # Errors
    /// Returns [`UiError::SubmissionInFlight`] while pending and
    /// [`UiError::Core`] when a required field is blank.
    pub fn submit<F, E>(&mut self, submit: F) -> Result<bool, UiError>
    where
        F: FnOnce(ContentRequest) -> Result<(), E>,
        E: fmt::Display,
    {
        if self.submission.is_pending() {
            return Err(UiError::SubmissionInFlight);
        }
        self.request.validate()?;
        self.submission.begin()?;
        self.alert = None;

        match submit(self.request.clone()) {
            Ok(()) => {
                self.submission.finish(Ok(()))?;
                Ok(true)
            }
            Err(error) => {
                let message = format!("{GENERATION_ALERT_PREFIX}{error}");
                self.submission.finish(Err(message.clone()))?;
                self.alert = Some(message);
                Ok(false)
            }
        }
    }
}

/// Which text block of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultField {
    /// Generated post text.
    Script,
    /// Prompt describing the visual.
    VisualPrompt,
}

/// Image area of the result screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot<'a> {
    /// Image available at this URL.
    Url(&'a str),
    /// No image; show the visual prompt placeholder.
    Placeholder,
}

/// One word of a staggered reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealStep<'a> {
    /// Offset from the start of the reveal.
    pub delay: Duration,
    /// Word to show.
    pub word: &'a str,
}

/// Splits `text` on spaces and assigns each word a [`REVEAL_STEP`] offset.
pub fn reveal_schedule(text: &str) -> Vec<RevealStep<'_>> {
    text.split(' ')
        .enumerate()
        .map(|(index, word)| RevealStep {
            delay: REVEAL_STEP.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX)),
            word,
        })
        .collect()
}

/// System clipboard seam.
pub trait Clipboard {
    /// Replaces clipboard contents.
    ///
    /// # Errors
    /// Returns a display message when the clipboard is unavailable.
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}

/// Generated-content screen. Holds the transient response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultScreen {
    response: ContentResponse,
    script_copied_at: Option<Instant>,
    prompt_copied_at: Option<Instant>,
}

impl ResultScreen {
    /// Creates the screen for `response`.
    pub fn new(response: ContentResponse) -> Self {
        Self {
            response,
            script_copied_at: None,
            prompt_copied_at: None,
        }
    }

    /// Displayed response.
    pub fn response(&self) -> &ContentResponse {
        &self.response
    }

    /// Text of `field`.
    pub fn text(&self, field: ResultField) -> &str {
        match field {
            ResultField::Script => &self.response.script,
            ResultField::VisualPrompt => &self.response.visual_prompt,
        }
    }

    /// Reveal schedule for `field`.
    pub fn reveal(&self, field: ResultField) -> Vec<RevealStep<'_>> {
        reveal_schedule(self.text(field))
    }

    /// Image area content.
    pub fn image(&self) -> ImageSlot<'_> {
        match self.response.image_url.as_deref() {
            Some(url) if !url.is_empty() => ImageSlot::Url(url),
            _ => ImageSlot::Placeholder,
        }
    }

    /// Copies `field` and starts its acknowledgment window.
    ///
    /// Fire-and-forget: a clipboard failure is logged, the acknowledgment
    /// still shows.
    pub fn copy(&mut self, field: ResultField, clipboard: &mut dyn Clipboard, now: Instant) {
        if let Err(error) = clipboard.set_text(self.text(field)) {
            tracing::warn!(?field, %error, "clipboard write failed");
        }
        match field {
            ResultField::Script => self.script_copied_at = Some(now),
            ResultField::VisualPrompt => self.prompt_copied_at = Some(now),
        }
    }

    /// Returns `true` while `field`'s acknowledgment is visible at `now`.
    pub fn is_copied(&self, field: ResultField, now: Instant) -> bool {
        let copied_at = match field {
            ResultField::Script => self.script_copied_at,
            ResultField::VisualPrompt => self.prompt_copied_at,
        };
        copied_at
            .and_then(|at| now.checked_duration_since(at))
            .is_some_and(|elapsed| elapsed < COPY_ACK_WINDOW)
    }

    /// Copy button label at `now`.
    pub fn copy_label(&self, field: ResultField, now: Instant) -> &'static str {
        if self.is_copied(field, now) {
            "Copied!"
        } else {
            "Copy"
        }
    }
}

/// Rendered image element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    /// Image source (a `data:` URI for generated images).
    pub src: String,
}

/// Standalone image-generation screen.
#[derive(Debug, Clone, Default)]
pub struct ImageGeneratorScreen {
    /// Prompt input.
    pub prompt: String,
    request: RequestLifecycle<ImageView>,
}

impl ImageGeneratorScreen {
    /// Creates an empty screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks the prompt and moves to `Pending`, clearing the previous image
    /// and error.
    ///
    /// # Errors
    /// Returns [`UiError::SubmissionInFlight`] while pending and
    /// [`UiError::EmptyPrompt`] for a blank prompt.
    pub fn begin_submit(&mut self) -> Result<String, UiError> {
        if self.request.is_pending() {
            return Err(UiError::SubmissionInFlight);
        }
        if self.prompt.trim().is_empty() {
            return Err(UiError::EmptyPrompt);
        }
        self.request.begin()?;
        Ok(self.prompt.clone())
    }

    /// Applies the outcome of the pending request.
    ///
    /// # Errors
    /// Returns [`UiError::NotPending`] when nothing was submitted.
    pub fn finish_submit(&mut self, outcome: Result<ImageView, String>) -> Result<(), UiError> {
        self.request.finish(outcome)
    }

    /// Rendered image, if the last request succeeded.
    pub fn image(&self) -> Option<&ImageView> {
        self.request.success()
    }

    /// Inline error from the last request.
    pub fn error(&self) -> Option<&str> {
        self.request.failure()
    }

    /// Returns `true` while the submit control is disabled.
    pub fn is_loading(&self) -> bool {
        self.request.is_pending()
    }
}

/// UI state errors.
#[derive(Debug, Error)]
pub enum UiError {
    /// A request from this screen is still pending.
    #[error("a submission is already in progress")]
    SubmissionInFlight,
    /// An outcome arrived with no pending request.
    #[error("no submission is pending")]
    NotPending,
    /// Image prompt is blank.
    #[error("prompt is required")]
    EmptyPrompt,
    /// Auth form check failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Content request check failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}
