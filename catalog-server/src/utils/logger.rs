//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

/// Log file prefix for the daily rolling appender
const LOG_FILE_PREFIX: &str = "catalog-server";

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
///
/// `RUST_LOG` wins over `log_level` when set. Calling it twice is a no-op.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(build_filter(log_level.unwrap_or("info")))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir.and_then(prepare_log_dir) {
        let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        let _ = subscriber.with_ansi(false).with_writer(file_appender).try_init();
        return;
    }

    let _ = subscriber.try_init();
}

/// Env filter from `RUST_LOG`, falling back to `level`
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Make sure the log directory exists; `None` if it cannot be created
pub fn prepare_log_dir(dir: &str) -> Option<PathBuf> {
    let path = Path::new(dir);
    if let Err(e) = std::fs::create_dir_all(path) {
        eprintln!("Cannot create log directory {dir}: {e}, logging to stdout");
        return None;
    }
    Some(path.to_path_buf())
}
