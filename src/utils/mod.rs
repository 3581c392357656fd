//! Configuration and process setup helpers.

/// Logging setup for the server binary.
pub mod logging;
/// `usergate.toml` loading, environment overrides and validation.
pub mod toml_config;
