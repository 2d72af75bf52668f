//! Runtime configuration.
//!
//! Read from `<config_dir>/content-studio/config.toml`; a missing file means
//! defaults. Environment variables override file values.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use content_studio_api::{DEFAULT_API_BASE_URL, normalize_base_url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Directory name under the platform config and data dirs.
pub const APP_DIR_NAME: &str = "content-studio";

/// Config file name inside [`APP_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Overrides `api_base_url`.
pub const API_URL_ENV: &str = "CONTENT_STUDIO_API_URL";

/// Overrides `session_file`.
pub const SESSION_FILE_ENV: &str = "CONTENT_STUDIO_SESSION_FILE";

/// Base URL baked in at build time, falling back to the local backend.
pub fn build_default_api_url() -> &'static str {
    option_env!("CONTENT_STUDIO_API_URL").unwrap_or(DEFAULT_API_BASE_URL)
}

/// Default session file location under the platform data dir.
pub fn default_session_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|base| base.join(APP_DIR_NAME).join("session.json"))
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Backend base URL.
    pub api_base_url: String,
    /// Session file; `None` uses [`default_session_path`].
    pub session_file: Option<PathBuf>,
    /// Send the stored token with `/generate-image`.
    pub authenticate_image_requests: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: build_default_api_url().to_string(),
            session_file: None,
            authenticate_image_requests: false,
        }
    }
}

impl AppConfig {
    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads `path`, returning defaults when it does not exist.
    ///
    /// # Errors
    /// Returns [`ConfigError::Read`] for I/O failures and
    /// [`ConfigError::Parse`] for invalid TOML or unknown keys.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the file at `path` (or the default location), applies the
    /// process environment and validates the result.
    ///
    /// # Errors
    /// See [`AppConfig::load`] and [`AppConfig::validate`].
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from `lookup`. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = present(API_URL_ENV) {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(path) = present(SESSION_FILE_ENV) {
            self.session_file = Some(PathBuf::from(path));
        }
    }

    /// Checks that the base URL is usable.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidApiUrl`] naming the rejected value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        normalize_base_url(&self.api_base_url)
            .map(|_| ())
            .map_err(|error| ConfigError::InvalidApiUrl {
                value: self.api_base_url.clone(),
                reason: error.to_string(),
            })
    }

    /// Session file to use.
    ///
    /// # Errors
    /// Returns [`ConfigError::NoDataDir`] when neither a configured path nor
    /// a platform data dir exists.
    pub fn session_path(&self) -> Result<PathBuf, ConfigError> {
        self.session_file
            .clone()
            .or_else(default_session_path)
            .ok_or(ConfigError::NoDataDir)
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but cannot be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Config file is not valid.
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
    /// Base URL rejected.
    #[error("invalid api_base_url {value:?}: {reason}")]
    InvalidApiUrl {
        /// Rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
    /// No place to keep the session file.
    #[error("no data directory available for the session file")]
    NoDataDir,
}
