//! Bluetooth Console library
//!
//! This crate provides the core of the `btc` terminal dashboard: the device
//! snapshot model, the system collaborators that list and control Bluetooth
//! devices, and the interactive session controller that drives the TUI.
//!
//! # Platform Support
//!
//! Device inventory and control shell out to macOS tooling
//! (`system_profiler`, `defaults`, `bluetoothd`) and the optional
//! `blueutil` helper. The controller and renderer are platform independent
//! and fully testable without any of those tools present.

use std::fmt;

/// Device inventory and action execution against the host Bluetooth stack.
pub mod bluetooth;

/// Configuration utilities including XDG path resolution.
pub mod config;

/// Tracing subscriber setup.
pub mod logging;

/// TUI module providing the terminal user interface for the dashboard.
pub mod tui;

/// A paired Bluetooth device as reported by one snapshot.
///
/// Devices are value objects identified by `address`. A new snapshot
/// replaces the previous list wholesale; nothing is merged per device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Hardware address, e.g. `AA:BB:CC:DD:EE:FF`.
    pub address: String,
    /// Display name.
    pub name: String,
    /// Minor device class (`Headphones`, `Keyboard`, ...), if reported.
    pub category: Option<String>,
    /// Whether the device is currently connected.
    pub connected: bool,
    /// Battery percentage in `0..=100`, `None` when unknown.
    pub battery: Option<u8>,
    /// Signal strength in dBm, `None` when unknown.
    pub rssi: Option<i32>,
}

impl Device {
    /// Creates a disconnected device with no category, battery, or signal data.
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
            category: None,
            connected: false,
            battery: None,
            rssi: None,
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.address)
    }
}

/// Result of a single device fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Devices in the order the fetcher reported them.
    pub devices: Vec<Device>,
    /// Controller power state, when the fetch output reports one.
    pub powered: Option<bool>,
}

impl Snapshot {
    /// Number of connected devices in this snapshot.
    pub fn connected_count(&self) -> usize {
        connected_count(&self.devices)
    }
}

/// Counts connected devices in a list.
pub fn connected_count(devices: &[Device]) -> usize {
    devices.iter().filter(|d| d.connected).count()
}
