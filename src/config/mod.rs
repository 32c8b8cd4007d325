//! Configuration module for the groundwork build
//!
//! Provides types and parsing for `groundwork.toml` project configuration.

pub mod loader;
pub mod schema;

pub use loader::{
    default_config, find_config, find_config_from, load_config, merge_cli_overrides,
    resolve_path, CliOverrides, ConfigError, CONFIG_FILE_NAME,
};
pub use schema::*;
