//! Slicing strategies
//!
//! A [`Slicer`] answers three local questions about a pixel of the source
//! sheet: does a sprite start here, is this the last column of the sprite,
//! and is this the last row. The scan in [`crate::slicing`] turns those
//! answers into rectangles.
//!
//! # Module Structure
//!
//! - [`grid`] - fixed-size cells, pure arithmetic
//! - [`color_lookup`] - sprites separated by background colors

pub mod color_lookup;
pub mod grid;

use std::fmt;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use color_lookup::{ColorLookupProps, ColorLookupSlicer};
pub use grid::{GridProps, GridSlicer};

/// Boundary predicates for one slicing strategy.
///
/// Implementations must be deterministic and free of side effects. They are
/// immutable values: reconfiguring produces a new slicer.
pub trait Slicer: fmt::Debug + Send + Sync {
    /// Catalog name of the strategy (see [`SLICERS`]).
    fn name(&self) -> &'static str;

    /// True iff `(x, y)` should start a new slice.
    fn is_top_left_of_sprite(&self, x: u32, y: u32, image: &RgbaImage) -> bool;

    /// True iff column `x` is the last column of the sprite on row `y`.
    fn is_right_edge_of_sprite(&self, x: u32, y: u32, image: &RgbaImage) -> bool;

    /// True iff row `y` is the last row of the sprite on column `x`.
    fn is_bottom_edge_of_sprite(&self, x: u32, y: u32, image: &RgbaImage) -> bool;

    /// Current configuration, in boundary form.
    fn config(&self) -> SlicerConfig;
}

/// Slicer configuration as it crosses the UI / config-file boundary.
///
/// ```
/// use spritecut::slicer::SlicerConfig;
///
/// let config: SlicerConfig =
///     serde_json::from_str(r#"{"kind": "grid", "cellWidth": 8, "cellHeight": 8}"#).unwrap();
/// let slicer = config.build().unwrap();
/// assert_eq!(slicer.name(), "Slice by Grid");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SlicerConfig {
    Grid(GridProps),
    ColorLookup(ColorLookupProps),
}

impl SlicerConfig {
    /// Validate the props and build the slicer they describe.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` for non-positive grid cells, `InvalidColorFormat`
    /// for unparseable colors.
    pub fn build(&self) -> Result<Box<dyn Slicer>> {
        Ok(match self {
            SlicerConfig::Grid(props) => Box::new(GridSlicer::from_props(props)?),
            SlicerConfig::ColorLookup(props) => Box::new(ColorLookupSlicer::from_props(props)?),
        })
    }
}

/// A user-facing entry in a strategy catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub description: &'static str,
}

/// All built-in slicing strategies, in display order.
pub const SLICERS: &[CatalogEntry] = &[
    CatalogEntry {
        name: GridSlicer::NAME,
        description: "Slice spritesheet into evenly sized frames. This is a classic grid slicing",
    },
    CatalogEntry {
        name: ColorLookupSlicer::NAME,
        description: "In case your frames are scattered inside your spritesheet, \
                      you can identify them by color",
    },
];

/// Create a slicer with default props from its catalog name.
pub fn default_slicer(name: &str) -> Option<Box<dyn Slicer>> {
    match name {
        GridSlicer::NAME => Some(Box::new(GridSlicer::default())),
        ColorLookupSlicer::NAME => Some(Box::new(ColorLookupSlicer::default())),
        _ => None,
    }
}
