//! Logging initialization.
//!
//! The dashboard owns the terminal, so log output goes to a file. Filter
//! directives come from the `BTC_LOG` environment variable, falling back to
//! the configured level.
//!
//! ```bash
//! BTC_LOG=debug btc
//! BTC_LOG=bluetooth_console::tui=trace,warn btc
//! tail -f "${XDG_RUNTIME_DIR:-/tmp}/bluetooth-console.log"
//! ```

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::{LogLevel, LoggingConfig};
use crate::config::xdg;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "BTC_LOG";

/// Installs the global subscriber writing to the configured log file.
///
/// Returns the path being written. A second call in the same process leaves
/// the first subscriber in place.
pub fn init(config: &LoggingConfig) -> std::io::Result<PathBuf> {
    let path = config.file_path();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            xdg::ensure_dir(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let installed = fmt()
        .with_env_filter(build_filter(config.level))
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(path)
}

/// `BTC_LOG` directives when set and valid, otherwise `level`.
fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}
