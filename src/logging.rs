use std::io;
use std::path::{Path, PathBuf};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_NAME: &str = "cellgrid.log";

/// Initialize logging to `{log_dir}/cellgrid.log`.
///
/// The terminal is owned by the UI, so nothing is written to stdout. The
/// level comes from `RUST_LOG` when set, otherwise from `level`.
pub fn init_logging(log_dir: &Path, level: &str) -> io::Result<PathBuf> {
    std::fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(LOG_FILE_NAME);
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);

    let default_filter = format!("cellgrid={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .map_err(io::Error::other)?;

    tracing::info!("cellgrid logging initialized (log_path={})", log_path.display());
    Ok(log_path)
}
