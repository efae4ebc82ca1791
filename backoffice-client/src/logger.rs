//! Logging Infrastructure
//!
//! Structured logging setup for applications embedding the client.
//! `RUST_LOG` overrides the level passed in.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

/// Initialize console logging
pub fn init_logger(level: &str, json_format: bool) -> Result<(), LoggerError> {
    init_logger_with_file(level, json_format, None)
}

/// Initialize console logging plus an optional daily rotating file
///
/// # Examples
/// ```no_run
/// // Development setup (console only)
/// backoffice_client::logger::init_logger_with_file("debug", false, None).unwrap();
///
/// // Production setup (console + file)
/// backoffice_client::logger::init_logger_with_file("info", true, Some("./logs")).unwrap();
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> Result<(), LoggerError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .boxed()
    } else {
        fmt::layer().with_target(false).boxed()
    };

    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(Path::new(dir))?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, "backoffice");
            Some(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::sync::Mutex::new(appender))
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggerError::Init(e.to_string()))
}

/// Logger setup failure
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("failed to create log directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to install subscriber: {0}")]
    Init(String),
}
