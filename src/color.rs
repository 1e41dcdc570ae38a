//! Color parsing and canonicalization
//!
//! Every color that crosses a slicer or effect configuration boundary is
//! reduced to a [`CanonicalColor`], a packed 32-bit RGBA value whose string
//! form is always lowercase `#rrggbbaa`. Two colors are equal iff their
//! canonical forms are byte-identical; there is no distance metric.
//!
//! Accepted inputs:
//! - Hex: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (any case)
//! - Functional: `rgb()`, `rgba()`, `hsl()`, `hsla()`, `hwb()`, `oklch()`
//! - Named: `red`, `white`, `transparent`, etc.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// A color in canonical form.
///
/// Internally a packed `0xRRGGBBAA` word; displayed and serialized as
/// `#rrggbbaa`. Deserialization accepts any format [`parse_color`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalColor(u32);

impl CanonicalColor {
    /// Fully transparent black, `#00000000`.
    pub const TRANSPARENT: CanonicalColor = CanonicalColor(0);

    /// Build from raw channels.
    pub const fn from_pixel(r: u8, g: u8, b: u8, a: u8) -> Self {
        CanonicalColor(u32::from_be_bytes([r, g, b, a]))
    }

    /// Build from raw color channels; alpha defaults to fully opaque.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_pixel(r, g, b, 0xff)
    }

    /// Canonical form of an image pixel, alpha included.
    pub fn from_rgba(pixel: Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        Self::from_pixel(r, g, b, a)
    }

    /// The packed `0xRRGGBBAA` value.
    pub const fn packed(self) -> u32 {
        self.0
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba(self.0.to_be_bytes())
    }

    /// The `#rrggbbaa` string form.
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CanonicalColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

impl FromStr for CanonicalColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        canonicalize(s)
    }
}

impl TryFrom<String> for CanonicalColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        canonicalize(&value)
    }
}

impl From<CanonicalColor> for String {
    fn from(color: CanonicalColor) -> Self {
        color.to_hex()
    }
}

impl From<Rgba<u8>> for CanonicalColor {
    fn from(pixel: Rgba<u8>) -> Self {
        Self::from_rgba(pixel)
    }
}

/// Canonicalize any accepted color representation.
///
/// ```
/// use spritecut::color::canonicalize;
///
/// assert_eq!(canonicalize("#F00").unwrap().to_hex(), "#ff0000ff");
/// assert_eq!(canonicalize("white").unwrap().to_hex(), "#ffffffff");
/// assert_eq!(canonicalize("#12345678").unwrap().to_hex(), "#12345678");
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is not a recognizable color.
pub fn canonicalize(s: &str) -> Result<CanonicalColor, ColorError> {
    parse_color(s).map(CanonicalColor::from_rgba)
}

/// Canonicalize a list of colors, dropping duplicates but keeping the order
/// in which each color first appeared.
pub fn canonicalize_all<S: AsRef<str>>(colors: &[S]) -> Result<Vec<CanonicalColor>, ColorError> {
    let mut out: Vec<CanonicalColor> = Vec::with_capacity(colors.len());
    for c in colors {
        let color = canonicalize(c.as_ref())?;
        if !out.contains(&color) {
            out.push(color);
        }
    }
    Ok(out)
}

/// Parse a CSS color string into an RGBA color.
///
/// Hex input takes a fast path; everything else goes through lightningcss.
///
/// ```
/// use spritecut::color::parse_color;
///
/// assert_eq!(parse_color("#F00").unwrap(), image::Rgba([255, 0, 0, 255]));
/// assert_eq!(parse_color("rgb(0, 255, 0)").unwrap(), image::Rgba([0, 255, 0, 255]));
/// assert_eq!(parse_color("blue").unwrap(), image::Rgba([0, 0, 255, 255]));
/// ```
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    match s.strip_prefix('#') {
        Some(hex) => parse_hex_color(hex),
        None => parse_css_color(s),
    }
}

/// Parse the digits of a hex color (without the leading '#')
fn parse_hex_color(hex: &str) -> Result<Rgba<u8>, ColorError> {
    let digits = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8).ok_or(ColorError::InvalidHex(c)))
        .collect::<Result<Vec<u8>, _>>()?;

    match digits.as_slice() {
        // Short forms double each digit: #F00 -> #FF0000
        [r, g, b] => Ok(Rgba([r * 17, g * 17, b * 17, 255])),
        [r, g, b, a] => Ok(Rgba([r * 17, g * 17, b * 17, a * 17])),
        [r1, r0, g1, g0, b1, b0] => Ok(Rgba([r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, 255])),
        [r1, r0, g1, g0, b1, b0, a1, a0] => {
            Ok(Rgba([r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, a1 * 16 + a0]))
        }
        other => Err(ColorError::InvalidLength(other.len())),
    }
}

/// Parse a CSS color using lightningcss (rgb, hsl, hwb, oklch, named colors)
fn parse_css_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    use lightningcss::values::color::FloatColor;

    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    let rgb_color = css_color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Rgba([rgba.red, rgba.green, rgba.blue, rgba.alpha])),
        // Float colors show up when a component is 'none'
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => Ok(Rgba([
                unit_to_channel(rgb.r),
                unit_to_channel(rgb.g),
                unit_to_channel(rgb.b),
                unit_to_channel(rgb.alpha),
            ])),
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}

fn unit_to_channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
