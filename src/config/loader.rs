//! Configuration loading and discovery for `spritecut.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{NamedEffect, SpritecutConfig};
use crate::effects::{BlindColorEffect, BlindColorProps, EffectConfig};
use crate::slicer::SlicerConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "spritecut.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse spritecut.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Replace the configured slicer
    pub slicer: Option<SlicerConfig>,
    /// Extra colors to blind, merged into the "Blind Colors" effect
    pub blind_colors: Vec<String>,
    /// Override output directory
    pub out: Option<PathBuf>,
    /// Override frame file prefix
    pub prefix: Option<String>,
}

/// Find spritecut.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for spritecut.toml
/// 2. Check XDG_CONFIG_HOME/spritecut/spritecut.toml (or ~/.config/spritecut/spritecut.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find spritecut.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("spritecut").join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Find spritecut.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file, falling back to [`SpritecutConfig::default`].
pub fn load_config(path: Option<&Path>) -> Result<SpritecutConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "loading config");
            load_config_file(&p)
        }
        None => Ok(SpritecutConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<SpritecutConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parse and validate configuration text.
pub fn parse_config(contents: &str) -> Result<SpritecutConfig, ConfigError> {
    let config: SpritecutConfig = toml::from_str(contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a loaded configuration.
///
/// Blind colors from the command line are appended to the configured
/// "Blind Colors" effect, or create it at the end of the pipeline.
pub fn apply_overrides(mut config: SpritecutConfig, overrides: &CliOverrides) -> SpritecutConfig {
    if let Some(slicer) = &overrides.slicer {
        config.slicer = Some(slicer.clone());
    }
    if let Some(out) = &overrides.out {
        config.export.out = out.clone();
    }
    if let Some(prefix) = &overrides.prefix {
        config.export.prefix = prefix.clone();
    }

    if !overrides.blind_colors.is_empty() {
        match config.effects.iter_mut().find(|e| e.name == BlindColorEffect::NAME) {
            Some(NamedEffect { config: EffectConfig::BlindColor(props), .. }) => {
                props.blind_colors.extend(overrides.blind_colors.iter().cloned());
            }
            None => config.effects.push(NamedEffect {
                name: BlindColorEffect::NAME.to_string(),
                config: EffectConfig::BlindColor(BlindColorProps {
                    blind_colors: overrides.blind_colors.clone(),
                }),
            }),
        }
    }

    config
}
