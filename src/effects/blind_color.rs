//! Blind-color effect: listed colors become fully transparent

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use super::Effect;
use crate::color::{canonicalize, canonicalize_all, CanonicalColor};
use crate::error::Result;

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindColorProps {
    #[serde(alias = "blindColors", default)]
    pub blind_colors: Vec<String>,
}

/// Turns every pixel whose canonical color is listed into `#00000000`.
///
/// Idempotent: a blinded pixel is already `#00000000`, so a second pass
/// either leaves it alone or rewrites the same bytes.
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use spritecut::effects::{BlindColorEffect, Effect};
///
/// let effect = BlindColorEffect::new(&["#ff00ff"]).unwrap();
/// let out = effect.apply(RgbaImage::from_pixel(1, 1, Rgba([255, 0, 255, 255])));
/// assert_eq!(out.get_pixel(0, 0).0[3], 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlindColorEffect {
    blind_colors: Vec<CanonicalColor>,
}

impl BlindColorEffect {
    pub const NAME: &'static str = "Blind Colors";

    pub fn new<S: AsRef<str>>(blind_colors: &[S]) -> Result<Self> {
        Ok(Self { blind_colors: canonicalize_all(blind_colors)? })
    }

    pub fn from_colors(colors: impl IntoIterator<Item = CanonicalColor>) -> Self {
        let mut blind_colors = Vec::new();
        for color in colors {
            if !blind_colors.contains(&color) {
                blind_colors.push(color);
            }
        }
        Self { blind_colors }
    }

    pub fn from_props(props: &BlindColorProps) -> Result<Self> {
        Self::new(props.blind_colors.as_slice())
    }

    pub fn blind_colors(&self) -> &[CanonicalColor] {
        &self.blind_colors
    }

    pub fn with_blind_color(&self, color: &str) -> Result<Self> {
        let color = canonicalize(color)?;
        Ok(Self::from_colors(self.blind_colors.iter().copied().chain([color])))
    }

    pub fn without_blind_color(&self, color: &str) -> Result<Self> {
        let color = canonicalize(color)?;
        Ok(Self::from_colors(self.blind_colors.iter().copied().filter(|c| *c != color)))
    }

    pub fn props(&self) -> BlindColorProps {
        BlindColorProps { blind_colors: self.blind_colors.iter().map(|c| c.to_hex()).collect() }
    }
}

impl Effect for BlindColorEffect {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, mut image: RgbaImage) -> RgbaImage {
        if self.blind_colors.is_empty() {
            return image;
        }
        for pixel in image.pixels_mut() {
            if *pixel == CLEAR {
                continue;
            }
            if self.blind_colors.contains(&CanonicalColor::from_rgba(*pixel)) {
                *pixel = CLEAR;
            }
        }
        image
    }
}
