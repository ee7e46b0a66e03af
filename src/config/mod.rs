//! Reliability Configuration Module
//!
//! Physical constants, request defaults and the warranty benchmark table,
//! loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `ALT_RELIABILITY_CONFIG` environment variable (path to TOML file)
//! 2. `reliability.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::get()` anywhere:
//!
//! ```ignore
//! // In main():
//! config::init(ReliabilityConfig::load());
//!
//! // Anywhere in the codebase:
//! let k = config::get().physics.boltzmann_ev_per_k;
//! ```

mod reliability_config;
pub mod defaults;
pub mod validation;

pub use reliability_config::*;

use std::sync::OnceLock;

/// Global configuration, initialized once at startup.
static RELIABILITY_CONFIG: OnceLock<ReliabilityConfig> = OnceLock::new();

/// Initialize the global configuration.
///
/// Later calls are ignored with a warning.
pub fn init(config: ReliabilityConfig) {
    if RELIABILITY_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get a reference to the global configuration.
///
/// Falls back to built-in defaults if `init()` was never called, so library
/// users that never touch configuration get the documented behaviour.
pub fn get() -> &'static ReliabilityConfig {
    RELIABILITY_CONFIG.get_or_init(ReliabilityConfig::default)
}
