//! Configuration schema types for `spritecut.toml`
//!
//! ```toml
//! [slicer]
//! kind = "color-lookup"
//! background_colors = ["#ffffff"]
//!
//! [[effects]]
//! name = "Blind Colors"
//! kind = "blind-color"
//! blind_colors = ["#ff00ff"]
//!
//! [export]
//! out = "frames"
//! prefix = "frame"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::color::canonicalize;
use crate::effects::{EffectConfig, EffectSet};
use crate::error::Result;
use crate::output::DEFAULT_FRAME_PREFIX;
use crate::slicer::{Slicer, SlicerConfig};

/// A named entry of the `[[effects]]` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEffect {
    /// Key in the effect set; later entries with the same name are rejected
    pub name: String,
    #[serde(flatten)]
    pub config: EffectConfig,
}

/// Export output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory frames are written into
    #[serde(default = "default_out")]
    pub out: PathBuf,
    /// File stem: frames are named `{prefix}_{index}.png`
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_out() -> PathBuf {
    PathBuf::from("frames")
}

fn default_prefix() -> String {
    DEFAULT_FRAME_PREFIX.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { out: default_out(), prefix: default_prefix() }
    }
}

/// Complete `spritecut.toml` configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpritecutConfig {
    /// Slicing strategy; absent means none selected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slicer: Option<SlicerConfig>,
    /// Effects in application order
    #[serde(default)]
    pub effects: Vec<NamedEffect>,
    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "effects[0].blind_colors")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "spritecut.toml: '{}' {}", self.field, self.message)
    }
}

impl SpritecutConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        match &self.slicer {
            Some(SlicerConfig::Grid(grid)) => {
                if grid.cell_width <= 0 {
                    errors.push(ConfigValidationError {
                        field: "slicer.cell_width".to_string(),
                        message: "must be a positive integer".to_string(),
                    });
                }
                if grid.cell_height <= 0 {
                    errors.push(ConfigValidationError {
                        field: "slicer.cell_height".to_string(),
                        message: "must be a positive integer".to_string(),
                    });
                }
            }
            Some(SlicerConfig::ColorLookup(lookup)) => {
                check_colors("slicer.background_colors", &lookup.background_colors, &mut errors);
            }
            None => {}
        }

        for (i, effect) in self.effects.iter().enumerate() {
            if effect.name.trim().is_empty() {
                errors.push(ConfigValidationError {
                    field: format!("effects[{}].name", i),
                    message: "must be a non-empty string".to_string(),
                });
            } else if self.effects[..i].iter().any(|e| e.name == effect.name) {
                errors.push(ConfigValidationError {
                    field: format!("effects[{}].name", i),
                    message: format!("duplicates effect '{}'", effect.name),
                });
            }

            match &effect.config {
                EffectConfig::BlindColor(props) => {
                    check_colors(&format!("effects[{}].blind_colors", i), &props.blind_colors, &mut errors);
                }
            }
        }

        if self.export.prefix.is_empty() {
            errors.push(ConfigValidationError {
                field: "export.prefix".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Build the configured slicer, if any.
    pub fn build_slicer(&self) -> Result<Option<Box<dyn Slicer>>> {
        self.slicer.as_ref().map(SlicerConfig::build).transpose()
    }

    /// Build the configured effects in file order.
    pub fn build_effects(&self) -> Result<EffectSet> {
        let mut set = EffectSet::new();
        for effect in &self.effects {
            set.set(effect.name.clone(), effect.config.build()?);
        }
        Ok(set)
    }
}

fn check_colors(field: &str, colors: &[String], errors: &mut Vec<ConfigValidationError>) {
    for color in colors {
        if let Err(e) = canonicalize(color) {
            errors.push(ConfigValidationError {
                field: field.to_string(),
                message: format!("'{}' is not a color: {}", color, e),
            });
        }
    }
}
