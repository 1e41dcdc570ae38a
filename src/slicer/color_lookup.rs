//! Color-lookup slicing: sprites are whatever is not background
//!
//! A pixel whose canonical color is in the background set belongs to no
//! sprite. Reads past the right or bottom edge of the sheet count as
//! background, so a sprite touching the edge still ends there.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use super::{Slicer, SlicerConfig};
use crate::color::{canonicalize, canonicalize_all, CanonicalColor};
use crate::error::Result;

/// Color-lookup props as supplied by a caller (any accepted color syntax).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorLookupProps {
    #[serde(alias = "backgroundColors", default)]
    pub background_colors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorLookupSlicer {
    background_colors: Vec<CanonicalColor>,
}

impl ColorLookupSlicer {
    pub const NAME: &'static str = "Lookup by Color";

    /// Build from color strings; duplicates collapse.
    ///
    /// # Errors
    ///
    /// `InvalidColorFormat` if any color fails to parse.
    pub fn new<S: AsRef<str>>(background_colors: &[S]) -> Result<Self> {
        Ok(Self { background_colors: canonicalize_all(background_colors)? })
    }

    pub fn from_colors(colors: impl IntoIterator<Item = CanonicalColor>) -> Self {
        let mut background_colors = Vec::new();
        for color in colors {
            if !background_colors.contains(&color) {
                background_colors.push(color);
            }
        }
        Self { background_colors }
    }

    pub fn from_props(props: &ColorLookupProps) -> Result<Self> {
        Self::new(props.background_colors.as_slice())
    }

    pub fn background_colors(&self) -> &[CanonicalColor] {
        &self.background_colors
    }

    /// A new slicer that also treats `color` as background.
    pub fn with_background_color(&self, color: &str) -> Result<Self> {
        let color = canonicalize(color)?;
        Ok(Self::from_colors(self.background_colors.iter().copied().chain([color])))
    }

    /// A new slicer that no longer treats `color` as background.
    pub fn without_background_color(&self, color: &str) -> Result<Self> {
        let color = canonicalize(color)?;
        Ok(Self::from_colors(self.background_colors.iter().copied().filter(|c| *c != color)))
    }

    pub fn is_background(&self, color: CanonicalColor) -> bool {
        self.background_colors.contains(&color)
    }

    fn is_background_at(&self, x: u32, y: u32, image: &RgbaImage) -> bool {
        if x >= image.width() || y >= image.height() {
            return true;
        }
        self.is_background(CanonicalColor::from_rgba(*image.get_pixel(x, y)))
    }

    pub fn props(&self) -> ColorLookupProps {
        ColorLookupProps {
            background_colors: self.background_colors.iter().map(|c| c.to_hex()).collect(),
        }
    }
}

impl Slicer for ColorLookupSlicer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_top_left_of_sprite(&self, x: u32, y: u32, image: &RgbaImage) -> bool {
        !self.is_background_at(x, y, image)
    }

    fn is_right_edge_of_sprite(&self, x: u32, y: u32, image: &RgbaImage) -> bool {
        match x.checked_add(1) {
            Some(next) => self.is_background_at(next, y, image),
            None => true,
        }
    }

    fn is_bottom_edge_of_sprite(&self, x: u32, y: u32, image: &RgbaImage) -> bool {
        match y.checked_add(1) {
            Some(next) => self.is_background_at(x, next, image),
            None => true,
        }
    }

    fn config(&self) -> SlicerConfig {
        SlicerConfig::ColorLookup(self.props())
    }
}
