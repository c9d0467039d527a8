//! Device inventory from `system_profiler SPBluetoothDataType -json`.
//!
//! The profiler groups paired devices into `device_connected` and
//! `device_not_connected` arrays. Each array entry is a single-key object
//! mapping the device name to its property bag.

use super::{BluetoothError, CommandRunner};
use crate::{Device, Snapshot};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Battery property keys in priority order.
const BATTERY_KEYS: [&str; 4] = [
    "device_batteryLevel",
    "device_batteryLevelMain",
    "device_batteryLevelLeft",
    "device_batteryLevelCase",
];

#[derive(Debug, Deserialize)]
struct ProfilerOutput {
    #[serde(rename = "SPBluetoothDataType", default)]
    data: Vec<BluetoothData>,
}

#[derive(Debug, Default, Deserialize)]
struct BluetoothData {
    #[serde(default)]
    controller_properties: Map<String, Value>,
    #[serde(default)]
    device_connected: Vec<Map<String, Value>>,
    #[serde(default)]
    device_not_connected: Vec<Map<String, Value>>,
}

/// Runs the system profiler and parses its output into a [`Snapshot`].
pub fn fetch_snapshot(runner: &dyn CommandRunner) -> Result<Snapshot, BluetoothError> {
    let out = runner
        .run("system_profiler", &["SPBluetoothDataType", "-json"])
        .map_err(|e| e.with_context("failed to run system_profiler"))?;
    parse_snapshot(&out)
}

/// Parses profiler JSON into a snapshot.
///
/// Connected devices come first, then disconnected ones, each group in the
/// order the profiler listed them. Output with no Bluetooth section yields
/// an empty snapshot with unknown power state.
pub fn parse_snapshot(data: &[u8]) -> Result<Snapshot, BluetoothError> {
    let output: ProfilerOutput = serde_json::from_slice(data)?;
    let Some(bt) = output.data.into_iter().next() else {
        return Ok(Snapshot::default());
    };

    let mut devices = Vec::new();
    for entry in &bt.device_connected {
        devices.extend(parse_entry(entry, true));
    }
    for entry in &bt.device_not_connected {
        devices.extend(parse_entry(entry, false));
    }

    Ok(Snapshot {
        devices,
        powered: parse_power_state(&bt.controller_properties),
    })
}

fn parse_entry(entry: &Map<String, Value>, connected: bool) -> Vec<Device> {
    entry
        .iter()
        .filter_map(|(name, props)| {
            let props = props.as_object()?;
            Some(Device {
                address: get_str(props, "device_address").unwrap_or_default().to_string(),
                name: name.clone(),
                category: get_str(props, "device_minorType")
                    .filter(|s| !s.is_empty())
                    .map(String::from),
                connected,
                battery: parse_battery(props),
                rssi: parse_rssi(props),
            })
        })
        .collect()
}

/// Returns the first battery reading in `BATTERY_KEYS` order that parses.
fn parse_battery(props: &Map<String, Value>) -> Option<u8> {
    BATTERY_KEYS
        .iter()
        .find_map(|key| get_str(props, key).and_then(parse_percentage))
}

/// Parses strings like `"75%"` or `" 75 % "`. Values outside 0..=100 are rejected.
pub(crate) fn parse_percentage(s: &str) -> Option<u8> {
    let level: i64 = s.trim().trim_end_matches('%').trim().parse().ok()?;
    u8::try_from(level).ok().filter(|l| *l <= 100)
}

/// A reading of exactly 0 means the profiler had no signal data.
fn parse_rssi(props: &Map<String, Value>) -> Option<i32> {
    get_str(props, "device_rssi")
        .and_then(|s| s.trim().parse::<i32>().ok())
        .filter(|rssi| *rssi != 0)
}

fn parse_power_state(props: &Map<String, Value>) -> Option<bool> {
    match get_str(props, "controller_state")? {
        "attrib_on" => Some(true),
        "attrib_off" => Some(false),
        _ => None,
    }
}

fn get_str<'a>(props: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    props.get(key).and_then(Value::as_str)
}
