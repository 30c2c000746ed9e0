use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

/// Diagnostics go to stderr only; stdout stays free for the workflow.
///
/// With `log_file_path`, a second plain-text layer is written to that file.
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init_tracing(log_file_path: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    match log_file_path {
        Some(log_path) => {
            let file_appender = tracing_appender::rolling::never(
                log_path.parent().unwrap_or(Path::new(".")),
                log_path
                    .file_name()
                    .unwrap_or(std::ffi::OsStr::new("arxiv-daily.log")),
            );
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let _ = tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(non_blocking),
                )
                .try_init();
            Some(guard)
        }
        None => {
            let _ = tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .try_init();
            None
        }
    }
}
