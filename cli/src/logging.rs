use std::fs;
use std::io;
use std::path::Path;

use anyhow::{anyhow, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_DIRECTIVES: &str = "info";
const LOG_FILE_NAME: &str = "workstyle.log";

/// Logs go to a daily file under `<data_dir>/logs` so the TUI is never drawn over.
/// `stderr` adds a console layer for one-shot commands.
pub fn init(data_dir: &Path, stderr: bool) -> Result<WorkerGuard> {
    let log_dir = data_dir.join("logs");
    fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_DIRECTIVES))
        .map_err(|err| anyhow!("Invalid log filter: {err}"))?;

    let console = stderr.then(|| fmt::layer().with_writer(io::stderr).with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .with(console)
        .try_init()
        .map_err(|err| anyhow!("Logging already initialised: {err}"))?;

    Ok(guard)
}
