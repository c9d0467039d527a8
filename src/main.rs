//! Bluetooth Console - CLI entry point
//!
//! With no subcommand, launches the interactive dashboard. The `config`
//! subcommand manages the configuration file.

use bluetooth_console::bluetooth::{Bluetooth, SystemBluetooth};
use bluetooth_console::config::{default, loader::ConfigLoader, schema, xdg};
use bluetooth_console::logging;
use bluetooth_console::tui::app::App;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

/// Terminal dashboard for Bluetooth devices
#[derive(Parser)]
#[command(name = "btc")]
#[command(version, about = "Monitor and control Bluetooth devices from the terminal")]
struct Cli {
    /// Configuration file (default: $XDG_CONFIG_HOME/bluetooth-console/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Device list refresh period, e.g. "2s" (overrides tui.refresh_interval)
    #[arg(long, value_name = "DURATION", value_parser = parse_refresh)]
    refresh: Option<Duration>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file and print the effective settings
    Validate,
}

fn parse_refresh(value: &str) -> Result<Duration, String> {
    schema::parse_duration("--refresh", value).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        None => run_tui(cli.config.as_deref(), cli.refresh),
        Some(Commands::Config { action }) => run_config_command(action, cli.config.as_deref()),
    }
}

fn run_tui(config_path: Option<&Path>, refresh: Option<Duration>) -> ExitCode {
    let config = match ConfigLoader::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let tick_rate = match refresh.map_or_else(|| config.tui.refresh_interval(), Ok) {
        Ok(rate) => rate,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match logging::init(&config.logging) {
        Ok(path) => tracing::info!("logging to {}", path.display()),
        Err(e) => eprintln!("Warning: logging disabled, cannot open log file: {e}"),
    }

    let backend = SystemBluetooth::new(config.bluetooth.helper.clone());
    let helper_available = backend.helper_available();
    tracing::info!(
        "starting: refresh every {}, helper {} {}",
        humantime::format_duration(tick_rate),
        backend.helper(),
        if helper_available { "found" } else { "missing" }
    );
    let app = App::new(config.bluetooth.helper, helper_available);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    let result = rt.block_on(app.run(Arc::new(backend), tick_rate));
    // Fetches or actions still running are abandoned rather than awaited.
    rt.shutdown_background();

    if let Err(e) = result {
        eprintln!("TUI error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_config_command(action: ConfigAction, config_path: Option<&Path>) -> ExitCode {
    let result = match action {
        ConfigAction::Init { force } => default::create_default_config(force).map(|path| {
            println!("Created configuration at {}", path.display());
        }),
        ConfigAction::Path => {
            match config_path {
                Some(path) => println!("{}", path.display()),
                None => println!("{}", xdg::config_path().display()),
            }
            Ok(())
        }
        ConfigAction::Validate => ConfigLoader::load(config_path).and_then(|config| {
            let rendered = toml::to_string_pretty(&config).map_err(|e| {
                bluetooth_console::config::error::ConfigError::SerializeError {
                    message: e.to_string(),
                }
            })?;
            println!("Configuration is valid");
            print!("{rendered}");
            Ok(())
        }),
    };

    if let Err(e) = result {
        eprintln!("Config error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
