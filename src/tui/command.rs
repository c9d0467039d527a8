//! Side effects requested by the session controller.
//!
//! `App::update` only returns these; the runtime loop decides how to run
//! them. That keeps every state transition testable without a terminal or a
//! Bluetooth stack.

use crate::bluetooth::{Bluetooth, BluetoothError};

/// A side effect for the runtime to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch a fresh device snapshot.
    Fetch,
    /// Run a confirmed action.
    Execute(DeviceAction),
    /// Leave the event loop.
    Quit,
}

/// A state-changing operation awaiting or past confirmation.
///
/// Device actions carry both address and name so the prompt and the result
/// message still describe the right device after the list changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceAction {
    Connect { address: String, name: String },
    Disconnect { address: String, name: String },
    Remove { address: String, name: String },
    /// Power the controller on (`true`) or off (`false`).
    SetPower(bool),
    Reset,
}

impl DeviceAction {
    /// Question shown while confirming.
    pub fn prompt(&self) -> String {
        match self {
            Self::Connect { name, .. } => format!("Connect to {name}? (y/n)"),
            Self::Disconnect { name, .. } => format!("Disconnect {name}? (y/n)"),
            Self::Remove { name, .. } => {
                format!("Remove {name}? This will unpair the device. (y/n)")
            }
            Self::SetPower(on) => format!("Turn Bluetooth {}? (y/n)", on_off(*on)),
            Self::Reset => "Reset Bluetooth module? (y/n)".to_string(),
        }
    }

    /// Status text after the action succeeds.
    pub fn success_message(&self) -> String {
        match self {
            Self::Connect { name, .. } => format!("Connected to {name}"),
            Self::Disconnect { name, .. } => format!("Disconnected {name}"),
            Self::Remove { name, .. } => format!("Removed {name}"),
            Self::SetPower(on) => format!("Bluetooth powered {}", on_off(*on)),
            Self::Reset => "Bluetooth module reset".to_string(),
        }
    }

    /// Whether this action goes through the helper tool.
    pub fn needs_helper(&self) -> bool {
        matches!(
            self,
            Self::Connect { .. } | Self::Disconnect { .. } | Self::Remove { .. }
        )
    }

    /// Runs the action once. Blocks until the backend returns.
    pub fn execute(&self, backend: &dyn Bluetooth) -> Result<String, BluetoothError> {
        match self {
            Self::Connect { address, .. } => backend.connect(address)?,
            Self::Disconnect { address, .. } => backend.disconnect(address)?,
            Self::Remove { address, .. } => backend.remove(address)?,
            Self::SetPower(on) => backend.set_power(*on)?,
            Self::Reset => backend.reset()?,
        }
        Ok(self.success_message())
    }
}

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}
