//! TOML configuration schema types for the Bluetooth console.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so any subset of keys is a valid file.
//!
//! Duration fields are human-readable strings (`"5s"`, `"1m30s"`) parsed with
//! the `humantime` crate through the accessor methods below.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::bluetooth::DEFAULT_HELPER;
use crate::config::error::ConfigError;

/// Root configuration.
///
/// ```toml
/// [tui]
/// [bluetooth]
/// [logging]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Dashboard behavior.
    pub tui: TuiConfig,
    /// Host Bluetooth tooling.
    pub bluetooth: BluetoothConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

impl Config {
    /// Checks fields whose syntax `serde` cannot enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tui.refresh_interval()?;
        Ok(())
    }
}

/// `[tui]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TuiConfig {
    /// Period between device list refreshes, e.g. `"5s"`.
    pub refresh_interval: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            refresh_interval: "5s".to_string(),
        }
    }
}

impl TuiConfig {
    /// Parses `refresh_interval`. Zero is rejected since it would spin the
    /// refresh loop.
    pub fn refresh_interval(&self) -> Result<Duration, ConfigError> {
        parse_duration("tui.refresh_interval", &self.refresh_interval)
    }
}

/// `[bluetooth]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BluetoothConfig {
    /// Helper binary for connect, disconnect and unpair. A bare name is
    /// looked up on `PATH`; an absolute path is used as is.
    pub helper: String,
}

impl Default for BluetoothConfig {
    fn default() -> Self {
        Self {
            helper: DEFAULT_HELPER.to_string(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default verbosity when `BTC_LOG` is unset.
    pub level: LogLevel,
    /// Log file path. Empty means `<runtime dir>/bluetooth-console.log`.
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file: String::new(),
        }
    }
}

impl LoggingConfig {
    /// Resolved log file location with `~` expanded.
    pub fn file_path(&self) -> PathBuf {
        if self.file.is_empty() {
            crate::config::xdg::default_log_path()
        } else {
            crate::config::xdg::expand_tilde(&self.file)
        }
    }
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Parses a humantime duration, rejecting zero.
pub fn parse_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
        message,
    };
    let duration = humantime::parse_duration(value).map_err(|e| invalid(e.to_string()))?;
    if duration.is_zero() {
        return Err(invalid("must be greater than zero".to_string()));
    }
    Ok(duration)
}
