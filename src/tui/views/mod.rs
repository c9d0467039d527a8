//! View-specific rendering modules.

pub mod devices;
pub mod help;
