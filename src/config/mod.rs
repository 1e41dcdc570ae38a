//! Configuration module for spritecut
//!
//! Provides types and parsing for `spritecut.toml` project configuration.

pub mod loader;
pub mod schema;

pub use loader::{
    apply_overrides, find_config, find_config_from, load_config, parse_config, CliOverrides,
    ConfigError, CONFIG_FILE_NAME,
};
pub use schema::*;
