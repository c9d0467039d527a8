//! Platform-aware path resolution.
//!
//! Config lives under `$XDG_CONFIG_HOME/bluetooth-console`, else
//! `~/Library/Application Support/bluetooth-console` on macOS and
//! `~/.config/bluetooth-console` elsewhere. The default log file goes in the
//! runtime directory: `$XDG_RUNTIME_DIR`, else `$TMPDIR` on macOS, else `/tmp`.

use std::fs;
use std::path::{Path, PathBuf};

/// Directory and file stem used for every path this crate owns.
pub const APP_NAME: &str = "bluetooth-console";

/// Returns the configuration directory.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_config_dir().join(APP_NAME)
}

fn platform_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::config_dir().unwrap_or_else(|| home_dir().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home_dir().join(".config")
    }
}

/// Home directory, or the current directory when it cannot be determined.
fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Returns `config_dir()/config.toml`.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the directory for transient files.
pub fn runtime_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_RUNTIME_DIR") {
        return PathBuf::from(xdg);
    }
    platform_runtime_dir()
}

fn platform_runtime_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        std::env::var("TMPDIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        PathBuf::from("/tmp")
    }
}

/// Returns `runtime_dir()/bluetooth-console.log`.
pub fn default_log_path() -> PathBuf {
    runtime_dir().join(format!("{APP_NAME}.log"))
}

/// Expands a leading `~` to the home directory. Other paths are returned as is.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}

/// `mkdir -p` with mode 0700.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

/// Creates the configuration directory if needed and returns its path.
pub fn ensure_config_dir() -> std::io::Result<PathBuf> {
    let dir = config_dir();
    ensure_dir(&dir)?;
    Ok(dir)
}
