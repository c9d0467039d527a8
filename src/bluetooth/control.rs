//! Device and controller actions.
//!
//! Per-device actions go through the helper tool (`blueutil` by default).
//! Power and reset poke the system daemon directly and need root.

use super::{BluetoothError, CommandRunner};

/// Preferences domain holding the controller power state.
const BLUETOOTH_PREFS: &str = "/Library/Preferences/com.apple.Bluetooth";

/// Returns an error unless `helper` resolves on `PATH`.
pub fn require_helper(runner: &dyn CommandRunner, helper: &str) -> Result<(), BluetoothError> {
    if runner.is_installed(helper) {
        Ok(())
    } else {
        Err(BluetoothError::HelperMissing {
            helper: helper.to_string(),
        })
    }
}

/// Connects to a paired device.
pub fn connect(runner: &dyn CommandRunner, helper: &str, address: &str) -> Result<(), BluetoothError> {
    helper_action(runner, helper, "--connect", address, "failed to connect to")
}

/// Disconnects a connected device.
pub fn disconnect(
    runner: &dyn CommandRunner,
    helper: &str,
    address: &str,
) -> Result<(), BluetoothError> {
    helper_action(runner, helper, "--disconnect", address, "failed to disconnect")
}

/// Unpairs a device.
pub fn remove(runner: &dyn CommandRunner, helper: &str, address: &str) -> Result<(), BluetoothError> {
    helper_action(runner, helper, "--unpair", address, "failed to remove")
}

fn helper_action(
    runner: &dyn CommandRunner,
    helper: &str,
    flag: &str,
    address: &str,
    verb: &str,
) -> Result<(), BluetoothError> {
    require_helper(runner, helper)?;
    runner
        .run(helper, &[flag, address])
        .map_err(|e| e.with_context(format!("{verb} {address}")))?;
    Ok(())
}

/// Writes the controller power state and restarts `bluetoothd` to apply it.
pub fn set_power(runner: &dyn CommandRunner, on: bool) -> Result<(), BluetoothError> {
    let state = if on { "1" } else { "0" };
    runner
        .run(
            "defaults",
            &["write", BLUETOOTH_PREFS, "ControllerPowerState", "-int", state],
        )
        .map_err(|e| e.with_context("failed to set power state (sudo required)"))?;

    runner
        .run("killall", &["-HUP", "bluetoothd"])
        .map_err(|e| e.with_context("failed to restart bluetoothd"))?;
    Ok(())
}

/// Kills `bluetoothd`; launchd restarts it.
pub fn reset(runner: &dyn CommandRunner) -> Result<(), BluetoothError> {
    runner
        .run("sudo", &["pkill", "bluetoothd"])
        .map_err(|e| e.with_context("failed to reset bluetooth (sudo required)"))?;
    Ok(())
}
