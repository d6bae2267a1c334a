//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (authority addresses, timeouts, limits)
//! - The validated [`Settings`] structure (defaults, YAML file, CLI overrides)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    Command, DnsSettings, LogFormat, LogLevel, Opt, ScannerSettings, SecuritySettings, Settings,
};
