use color_eyre::Result;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "lions_essays.log";

/// Where log lines go. The interactive UI owns the terminal, so it logs to
/// a file; headless runs log to stderr next to their stdout output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    File,
    Stderr,
}

fn env_filter(debug: bool) -> EnvFilter {
    let default_level = if debug { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("lions_essays={default_level},warn"))
    })
}

/// Installs the global subscriber. Keep the returned guard alive for the
/// whole run or buffered file output is lost.
pub fn init(target: LogTarget, debug: bool, log_dir: &Path) -> Result<Option<WorkerGuard>> {
    match target {
        LogTarget::File => {
            std::fs::create_dir_all(log_dir)?;
            let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(debug))
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .try_init()
                .map_err(|e| color_eyre::eyre::eyre!("Failed to install logger: {e}"))?;
            Ok(Some(guard))
        }
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(debug))
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init()
                .map_err(|e| color_eyre::eyre::eyre!("Failed to install logger: {e}"))?;
            Ok(None)
        }
    }
}
