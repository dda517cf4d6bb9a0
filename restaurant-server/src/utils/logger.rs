//! Logging Infrastructure
//!
//! Structured logging setup for development and production.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger
///
/// `RUST_LOG` takes precedence over `log_level`. When `log_dir` points at an
/// existing directory, output goes to a daily-rotated file there instead of
/// stdout.
pub fn init_logger(log_level: &str, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(log_path, "restaurant-server");
            subscriber.with_ansi(false).with_writer(file_appender).init();
            return;
        }
        eprintln!("LOG_DIR {} does not exist, logging to stdout", dir);
    }

    subscriber.init();
}
