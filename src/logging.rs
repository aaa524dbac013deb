use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `~/.cache/sentiview/sentiview.log` (Linux) or the platform equivalent
pub fn default_log_path() -> Option<PathBuf> {
    Some(dirs::cache_dir()?.join("sentiview").join("sentiview.log"))
}

/// Install the global subscriber. The terminal belongs to the UI, so output
/// goes to a file; stderr is only used when no log path can be determined.
///
/// The returned guard must be held until exit so buffered lines are flushed.
pub fn init(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let path = log_file.map(Path::to_path_buf).or_else(default_log_path);
    let target = path.and_then(|path| {
        let dir = path.parent()?.to_path_buf();
        let file_name = path.file_name()?.to_owned();
        std::fs::create_dir_all(&dir).ok()?;
        Some((dir, file_name))
    });

    match target {
        Some((dir, file_name)) => {
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
            None
        }
    }
}
