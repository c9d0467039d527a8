//! Host Bluetooth collaborators.
//!
//! The session controller never calls these directly; the TUI runtime runs
//! them on blocking worker tasks and feeds their results back as events.

pub mod control;
pub mod error;
pub mod inventory;
pub mod runner;

pub use error::BluetoothError;
pub use runner::{CommandRunner, SystemRunner};

use crate::Snapshot;

/// Default helper tool for per-device actions.
pub const DEFAULT_HELPER: &str = "blueutil";

/// Everything the dashboard needs from the host Bluetooth stack.
///
/// Every call is a single blocking attempt with no internal retry.
/// `fetch_snapshot` must tolerate concurrent invocations of itself.
pub trait Bluetooth: Send + Sync {
    /// Lists all paired devices.
    fn fetch_snapshot(&self) -> Result<Snapshot, BluetoothError>;
    /// Connects to the device at `address`.
    fn connect(&self, address: &str) -> Result<(), BluetoothError>;
    /// Disconnects the device at `address`.
    fn disconnect(&self, address: &str) -> Result<(), BluetoothError>;
    /// Unpairs the device at `address`.
    fn remove(&self, address: &str) -> Result<(), BluetoothError>;
    /// Turns the controller on or off.
    fn set_power(&self, on: bool) -> Result<(), BluetoothError>;
    /// Restarts the Bluetooth subsystem.
    fn reset(&self) -> Result<(), BluetoothError>;
    /// Whether the helper tool for per-device actions is installed.
    fn helper_available(&self) -> bool;
}

/// [`Bluetooth`] implementation backed by macOS system tools.
#[derive(Debug, Clone)]
pub struct SystemBluetooth<R = SystemRunner> {
    runner: R,
    helper: String,
}

impl SystemBluetooth<SystemRunner> {
    /// Creates a backend that runs real processes with the given helper.
    pub fn new(helper: impl Into<String>) -> Self {
        Self::with_runner(SystemRunner, helper)
    }
}

impl<R: CommandRunner> SystemBluetooth<R> {
    /// Creates a backend over an arbitrary runner.
    pub fn with_runner(runner: R, helper: impl Into<String>) -> Self {
        Self {
            runner,
            helper: helper.into(),
        }
    }

    /// Name of the configured helper tool.
    pub fn helper(&self) -> &str {
        &self.helper
    }
}

impl<R: CommandRunner> Bluetooth for SystemBluetooth<R> {
    fn fetch_snapshot(&self) -> Result<Snapshot, BluetoothError> {
        inventory::fetch_snapshot(&self.runner)
    }

    fn connect(&self, address: &str) -> Result<(), BluetoothError> {
        control::connect(&self.runner, &self.helper, address)
    }

    fn disconnect(&self, address: &str) -> Result<(), BluetoothError> {
        control::disconnect(&self.runner, &self.helper, address)
    }

    fn remove(&self, address: &str) -> Result<(), BluetoothError> {
        control::remove(&self.runner, &self.helper, address)
    }

    fn set_power(&self, on: bool) -> Result<(), BluetoothError> {
        control::set_power(&self.runner, on)
    }

    fn reset(&self) -> Result<(), BluetoothError> {
        control::reset(&self.runner)
    }

    fn helper_available(&self) -> bool {
        self.runner.is_installed(&self.helper)
    }
}
