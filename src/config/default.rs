//! Default configuration template and `config init` file creation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

/// Commented TOML template with every default value.
///
/// Every value here must match `Config::default()`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Bluetooth Console Configuration
#
# Generated by `btc config init`. Every value below is the built-in default,
# so deleting a key (or the whole file) changes nothing.
#
# Location: $XDG_CONFIG_HOME/bluetooth-console/config.toml

# ==============================================================================
# Dashboard
# ==============================================================================

[tui]
# How often the device list is refreshed, as a human-readable duration.
# Examples: "2s", "500ms", "1m". Must be greater than zero.
# Overridden by `btc --refresh <DURATION>`.
refresh_interval = "5s"

# ==============================================================================
# Bluetooth tooling
# ==============================================================================

[bluetooth]
# Helper used for connect, disconnect and unpair.
# A bare name is looked up on PATH; an absolute path is used as is.
# Install with: brew install blueutil
# Without it the dashboard still lists devices and can toggle power or
# reset the controller, but per-device actions are refused.
helper = "blueutil"

# ==============================================================================
# Logging
# ==============================================================================

[logging]
# Default verbosity: "error", "warn", "info", "debug" or "trace".
# The BTC_LOG environment variable takes precedence and accepts full
# tracing filter directives, e.g. BTC_LOG=bluetooth_console=debug
level = "info"

# Log file path. The dashboard owns the terminal, so logs never go to it.
# Empty means <runtime dir>/bluetooth-console.log, where the runtime dir is
# $XDG_RUNTIME_DIR, else $TMPDIR on macOS, else /tmp.
# A leading ~ is expanded.
file = ""
"#;

/// Writes the default template to the XDG config path.
///
/// If a file already exists, returns `ConfigError::AlreadyExists` unless
/// `force` is set, in which case the old file is moved to `config.toml.backup`
/// first. Returns the path written.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();

    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists { path });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(&path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(&path)?;
    tracing::info!("Created default configuration at {}", path.display());
    Ok(path)
}

/// Writes the template with 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    xdg::ensure_config_dir().map_err(write_error)?;
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_error)?;
    }

    Ok(())
}
