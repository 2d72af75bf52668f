#![warn(missing_docs)]
//! # content-studio-auth
//!
//! ## Purpose
//! Implements session storage, the route guard and the login/registration
//! form model for `content-studio`.
//!
//! ## Responsibilities
//! - Persist the session token and display name through an injectable
//!   [`SessionStore`].
//! - Decide per navigation whether a protected screen may render
//!   ([`SessionGuard`]).
//! - Model the login/register mode toggle and required-field checks
//!   ([`AuthForm`]).
//!
//! ## Data flow
//! UI collects credentials in [`AuthForm`] -> [`AuthForm::submission`] builds
//! the endpoint body -> the API client sends it -> on login success the
//! orchestrator calls [`SessionStore::set_session`] -> [`SessionGuard`] reads
//! token presence on every navigation.
//!
//! ## Ownership and lifetimes
//! Sessions are owned (`String`) values. Stores use interior mutability so a
//! single `Arc<dyn SessionStore>` can be shared by every screen.
//!
//! ## Error model
//! Blank required fields and storage I/O failures surface as [`AuthError`].
//!
//! ## Security and privacy notes
//! This crate never logs credentials or token values. Token presence alone
//! counts as authenticated (an empty token does not); validity is only
//! discovered when a protected request fails. On unix the session file is
//! created with mode `0600`.
//!
//! ## Example
//! ```rust
//! use content_studio_auth::{GuardDecision, MemorySessionStore, Session, SessionGuard, SessionStore};
//!
//! let store = MemorySessionStore::new();
//! assert_eq!(SessionGuard::check(&store), GuardDecision::RedirectToLogin);
//!
//! store.set_session(&Session::new("T", "A")).unwrap();
//! assert_eq!(SessionGuard::check(&store), GuardDecision::Allow);
//! ```

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use content_studio_contract::{LoginRequest, RegisterRequest};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Notice shown after a successful registration.
pub const REGISTRATION_NOTICE: &str = "Registration successful! Please login.";

/// Fallback message when the server gives no detail for an auth failure.
pub const AUTH_FAILURE_FALLBACK: &str = "Authentication failed";

/// Persisted client session: token plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque token issued by `/login`.
    pub token: String,
    /// Display name issued alongside the token.
    pub username: String,
}

impl Session {
    /// Creates a session value.
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
        }
    }
}

/// Client-local storage for the session.
///
/// Token and username are written and cleared together.
pub trait SessionStore: Send + Sync {
    /// Current token, if any.
    fn token(&self) -> Option<String>;

    /// Current display name, if any.
    fn username(&self) -> Option<String>;

    /// Replaces the stored session.
    ///
    /// # Errors
    /// Returns [`AuthError::Storage`] when the backing medium fails.
    fn set_session(&self, session: &Session) -> Result<(), AuthError>;

    /// Removes token and username.
    ///
    /// # Errors
    /// Returns [`AuthError::Storage`] when the backing medium fails.
    fn clear(&self) -> Result<(), AuthError>;

    /// Returns `true` when a non-empty token is stored.
    fn has_token(&self) -> bool {
        self.token().is_some_and(|token| !token.is_empty())
    }
}

/// In-memory session store, lost on exit.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<Session>> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.slot().as_ref().map(|session| session.token.clone())
    }

    fn username(&self) -> Option<String> {
        self.slot().as_ref().map(|session| session.username.clone())
    }

    fn set_session(&self, session: &Session) -> Result<(), AuthError> {
        *self.slot() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.slot() = None;
        Ok(())
    }
}

/// JSON-file session store.
///
/// The file is read once at [`FileSessionStore::open`]; afterwards reads are
/// served from memory and every write goes straight to disk.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    cached: Mutex<Option<Session>>,
}

impl FileSessionStore {
    /// Opens the store at `path`, loading any existing session.
    ///
    /// An unreadable or malformed file is treated as "no session" so a
    /// corrupt file never locks the user out; the next login overwrites it.
    ///
    /// # Errors
    /// Returns [`AuthError::Storage`] when the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let path = path.into();
        let cached = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) if !session.token.is_empty() => Some(session),
                Ok(_) => None,
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "ignoring malformed session file");
                    None
                }
            },
            Err(error) if error.kind() == io::ErrorKind::NotFound => None,
            Err(error) => return Err(AuthError::storage(&path, error)),
        };

        Ok(Self {
            path,
            cached: Mutex::new(cached),
        })
    }

    /// Location of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn slot(&self) -> MutexGuard<'_, Option<Session>> {
        self.cached
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        self.slot().as_ref().map(|session| session.token.clone())
    }

    fn username(&self) -> Option<String> {
        self.slot().as_ref().map(|session| session.username.clone())
    }

    fn set_session(&self, session: &Session) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|error| AuthError::storage(parent, error))?;
        }
        let raw = serde_json::to_string_pretty(session)
            .map_err(|error| AuthError::Storage(format!("session encode failed: {error}")))?;
        write_private(&self.path, raw.as_bytes())
            .map_err(|error| AuthError::storage(&self.path, error))?;

        *self.slot() = Some(session.clone());
        tracing::debug!(path = %self.path.display(), "session stored");
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => return Err(AuthError::storage(&self.path, error)),
        }

        *self.slot() = None;
        tracing::debug!(path = %self.path.display(), "session cleared");
        Ok(())
    }
}

/// Writes `contents` to `path`, readable by the owner only on unix.
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        options.mode(0o600);
        let mut file = options.open(path)?;
        // `mode` only applies on creation; tighten files left by older builds.
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
        file.write_all(contents)
    }
    #[cfg(not(unix))]
    {
        options.open(path)?.write_all(contents)
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Protected content may render.
    Allow,
    /// Navigation must go to the login screen.
    RedirectToLogin,
}

/// Presence-only route guard.
///
/// No server round-trip and no token validation: an expired token that is
/// still stored passes the guard.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionGuard;

impl SessionGuard {
    /// Checks token presence in `store`.
    pub fn check(store: &dyn SessionStore) -> GuardDecision {
        if store.has_token() {
            GuardDecision::Allow
        } else {
            GuardDecision::RedirectToLogin
        }
    }
}

/// Auth screen mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// Email + password sign-in.
    #[default]
    Login,
    /// Username + email + password sign-up.
    Register,
}

impl AuthMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }

    /// Greeting shown above the form.
    pub fn greeting(self) -> &'static str {
        match self {
            AuthMode::Login => "Welcome back, Creator.",
            AuthMode::Register => "Start your journey.",
        }
    }

    /// Submit button label.
    pub fn action_label(self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Register => "Create Account",
        }
    }
}

/// Body ready to send for the current mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSubmission {
    /// `POST /login` body.
    Login(LoginRequest),
    /// `POST /register` body.
    Register(RegisterRequest),
}

/// Auth form fields. The username is only used in register mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    /// Display name (register only).
    pub username: String,
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl AuthForm {
    /// Builds the request body for `mode`.
    ///
    /// # Errors
    /// Returns [`AuthError::MissingField`] naming the first blank field the
    /// mode requires.
    pub fn submission(&self, mode: AuthMode) -> Result<AuthSubmission, AuthError> {
        if mode == AuthMode::Register {
            require("username", &self.username)?;
        }
        require("email", &self.email)?;
        require("password", &self.password)?;

        Ok(match mode {
            AuthMode::Login => AuthSubmission::Login(LoginRequest {
                email: self.email.clone(),
                password: self.password.clone(),
            }),
            AuthMode::Register => AuthSubmission::Register(RegisterRequest {
                username: self.username.clone(),
                email: self.email.clone(),
                password: self.password.clone(),
            }),
        })
    }
}

fn require(name: &'static str, value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::MissingField(name));
    }
    Ok(())
}

/// Errors produced by session storage and form checks.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A field the current mode requires is blank.
    #[error("{0} is required")]
    MissingField(&'static str),
    /// Session storage failure.
    #[error("session storage failure: {0}")]
    Storage(String),
}

impl AuthError {
    fn storage(path: &Path, error: io::Error) -> Self {
        AuthError::Storage(format!("{}: {error}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for form checks and mode toggling.

    use super::*;

    #[test]
    fn login_ignores_username() {
        let form = AuthForm {
            username: String::new(),
            email: "a@b.com".to_string(),
            password: "x".to_string(),
        };

        let submission = form.submission(AuthMode::Login).expect("login should build");
        assert!(matches!(submission, AuthSubmission::Login(_)));
        assert!(matches!(
            form.submission(AuthMode::Register),
            Err(AuthError::MissingField("username"))
        ));
    }

    #[test]
    fn empty_token_does_not_pass_the_guard() {
        let store = MemorySessionStore::new();
        store
            .set_session(&Session::new("", "A"))
            .expect("memory store should accept session");

        assert!(!store.has_token());
        assert_eq!(SessionGuard::check(&store), GuardDecision::RedirectToLogin);
    }

    #[test]
    fn toggling_twice_returns_to_login() {
        assert_eq!(AuthMode::Login.toggled().toggled(), AuthMode::Login);
        assert_eq!(AuthMode::default(), AuthMode::Login);
    }

    #[test]
    fn memory_store_clears_token_and_username_together() {
        let store = MemorySessionStore::new();
        store
            .set_session(&Session::new("T", "A"))
            .expect("memory store should accept session");
        store.clear().expect("memory store should clear");

        assert_eq!(store.token(), None);
        assert_eq!(store.username(), None);
    }
}
