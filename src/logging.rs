use std::path::PathBuf;

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// When set, JSON logs are also written here with daily rotation.
    pub log_dir: Option<PathBuf>,
    /// Used when `RUST_LOG` is not set.
    pub default_filter: Option<String>,
}

/// Installs the global subscriber. Keep the returned guard alive to flush the file writer.
pub fn init_logging(options: LogOptions) -> Option<WorkerGuard> {
    let default_filter = options
        .default_filter
        .as_deref()
        .unwrap_or(DEFAULT_FILTER)
        .to_string();
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // stdout carries command output, so human-readable logs go to stderr.
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match options.log_dir {
        Some(dir) => {
            let file_appender = rolling::daily(dir, "alert-editor.log");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false).json();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}
