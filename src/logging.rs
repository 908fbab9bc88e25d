//! Logging configuration using tracing
//!
//! The terminal belongs to the UI, so log records go to a daily rolling file
//! instead of stderr.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, ErrorKind, Result};

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "ALIEN_CONSOLE_LOG";

const LOG_FILE_NAME: &str = "alien-console.log";
const DEFAULT_FILTER: &str = "alien_console=info,warn";

/// Initialize the logging subsystem and return the log directory.
///
/// Logs are written to the platform data directory, e.g.
/// `~/.local/share/alien-console/logs/` on Linux.
/// Log level is controlled by the `ALIEN_CONSOLE_LOG` environment variable.
///
/// # Examples
/// ```bash
/// ALIEN_CONSOLE_LOG=debug alien-console
/// ALIEN_CONSOLE_LOG=alien_console=trace alien-console ./config.json
/// ```
pub fn init() -> Result<PathBuf> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .map_err(|err| Error::new(ErrorKind::Io(std::io::Error::other(err.to_string()))))?;

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "alien-console starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(log_dir)
}

/// Directory holding the rolling log files.
pub fn log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "alien-console")
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from(".").join("logs"))
}
