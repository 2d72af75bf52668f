//! File logging using tracing.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::AppError;
use crate::config::APP_DIR_NAME;

/// Filter override, e.g. `CONTENT_STUDIO_LOG=debug`.
pub const LOG_ENV: &str = "CONTENT_STUDIO_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_FILTER: &str = "content_studio=info,warn";

/// Log file prefix; the appender adds the date.
pub const LOG_FILE_NAME: &str = "content-studio.log";

/// Installs the global subscriber writing to a daily rolling file.
///
/// Returns the log directory.
///
/// # Errors
/// Returns [`AppError::Telemetry`] when the directory cannot be created or a
/// subscriber is already installed.
pub fn init() -> Result<PathBuf, AppError> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)
        .map_err(|error| AppError::Telemetry(format!("{}: {error}", log_dir.display())))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .map_err(|error| AppError::Telemetry(error.to_string()))?;

    tracing::info!(version = crate::app_version(), log_dir = %log_dir.display(), "content-studio starting");
    Ok(log_dir)
}

/// Log directory under the platform data dir.
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join("logs")
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
