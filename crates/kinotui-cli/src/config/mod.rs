//! Configuration management for kinotui.
//!
//! Loads and saves TOML config from the platform config directory.

#[allow(clippy::module_inception)]
mod config;
mod paths;

pub use config::AppConfig;
pub use paths::resolve_config_path;
