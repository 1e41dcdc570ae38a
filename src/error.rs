//! Crate-level error type
//!
//! Module-specific errors ([`ColorError`], [`OutputError`]) convert into
//! [`StudioError`] at the session and export boundaries.

use thiserror::Error;

use crate::color::ColorError;
use crate::output::OutputError;

/// Errors surfaced by slicing, effect configuration and export
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudioError {
    /// A color string could not be parsed
    #[error("invalid color format: {0}")]
    InvalidColorFormat(#[from] ColorError),

    /// Slicer or effect properties were rejected; prior state is retained
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// No spritesheet has been loaded
    #[error("no spritesheet loaded")]
    NoSourceImage,

    /// No slicing strategy has been chosen
    #[error("no slicer selected")]
    NoSlicerSelected,

    /// Export was requested before any slices were computed
    #[error("no slices computed")]
    NoSlicesComputed,

    /// Decoding or encoding an image failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Writing frames failed
    #[error(transparent)]
    Output(#[from] OutputError),
}

impl StudioError {
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// True for the "nothing to do yet" kinds: missing image, slicer or slices.
    ///
    /// These describe an incomplete session rather than a fault, and callers
    /// usually report them instead of aborting.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::NoSourceImage | Self::NoSlicerSelected | Self::NoSlicesComputed)
    }
}

/// Result alias for studio operations.
pub type Result<T> = std::result::Result<T, StudioError>;
