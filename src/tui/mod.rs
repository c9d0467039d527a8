//! Terminal user interface for the Bluetooth console.
//!
//! Built on ratatui and crossterm. [`app::App`] holds the session state,
//! [`ui`] draws it, and [`event`] funnels input, ticks and worker results
//! into the single loop that drives both.

pub mod app;
pub mod command;
pub mod event;
pub mod ui;
pub mod viewport;
pub mod views;

#[cfg(test)]
pub(crate) mod test_utils;
