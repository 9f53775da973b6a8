//! Logging Infrastructure
//!
//! Console logs go to stderr so stdout carries only the response envelope.
//! `RUST_LOG` directives take precedence over the configured level.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Initialize the logger with optional JSON formatting and file output
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), log_level);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let log_path = log_dir.map(Path::new).filter(|p| p.is_dir());

    let result = match (log_path, json) {
        (Some(dir), true) => {
            let file_appender = tracing_appender::rolling::daily(dir, "order-desk");
            subscriber.json().with_writer(file_appender).try_init()
        }
        (Some(dir), false) => {
            let file_appender = tracing_appender::rolling::daily(dir, "order-desk");
            subscriber
                .with_ansi(false)
                .with_writer(file_appender)
                .try_init()
        }
        (None, true) => subscriber.json().with_writer(std::io::stderr).try_init(),
        (None, false) => subscriber.with_writer(std::io::stderr).try_init(),
    };

    if result.is_err() {
        tracing::debug!("Logger already initialized");
    }
}

/// `RUST_LOG`-style directives if they parse, else the configured level
fn build_filter(directives: Option<&str>, log_level: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(log_level.unwrap_or("info")))
}
