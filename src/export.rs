//! Frame export: crop every slice, run the effect pipeline, encode
//!
//! Frames are produced in slice order and named `frame_<index>.png`, where
//! `index` is the zero-based position in the slice list.

use std::path::{Path, PathBuf};

use image::imageops;
use image::RgbaImage;
use tracing::info;

use crate::effects::EffectSet;
use crate::error::{Result, StudioError};
use crate::output::{self, DEFAULT_FRAME_PREFIX};
use crate::slicing::Slice;

/// One exported frame, post-effects.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: usize,
    /// Canonical artifact name, always `frame_<index>.png`. Files written
    /// with another prefix are named by [`Frame::file_name`].
    pub name: String,
    pub slice: Slice,
    pub image: RgbaImage,
}

impl Frame {
    pub fn to_png(&self) -> Result<Vec<u8>> {
        Ok(output::encode_png(&self.image)?)
    }

    /// File name under `prefix`; equals [`Frame::name`] for the default prefix.
    pub fn file_name(&self, prefix: &str) -> String {
        output::frame_file_name(prefix, self.index)
    }
}

/// Artifact name for the frame at `index`.
pub fn frame_name(index: usize) -> String {
    output::frame_file_name(DEFAULT_FRAME_PREFIX, index)
}

/// Copy the pixels under `slice` (inclusive bounds) out of `image`.
pub fn crop_slice(image: &RgbaImage, slice: &Slice) -> RgbaImage {
    imageops::crop_imm(image, slice.x1, slice.y1, slice.width(), slice.height()).to_image()
}

/// Crop every slice from `image` and fold it through `effects`.
///
/// # Errors
///
/// `NoSourceImage` when `image` is `None`, `NoSlicesComputed` when `slices`
/// is empty. Nothing is produced in either case.
#[tracing::instrument(skip_all, fields(slices = slices.len(), effects = effects.len()))]
pub fn export_frames(
    image: Option<&RgbaImage>,
    slices: &[Slice],
    effects: &EffectSet,
) -> Result<Vec<Frame>> {
    let image = image.ok_or(StudioError::NoSourceImage)?;
    if slices.is_empty() {
        return Err(StudioError::NoSlicesComputed);
    }

    let frames: Vec<Frame> = slices
        .iter()
        .enumerate()
        .map(|(index, slice)| Frame {
            index,
            name: frame_name(index),
            slice: *slice,
            image: effects.apply(crop_slice(image, slice)),
        })
        .collect();

    info!(count = frames.len(), "frames exported");
    Ok(frames)
}

/// Encode every frame into a `(canonical name, png bytes)` pair, in frame order.
pub fn encode_frames(frames: &[Frame]) -> Result<Vec<(String, Vec<u8>)>> {
    frames.iter().map(|f| f.to_png().map(|png| (f.name.clone(), png))).collect()
}

/// Write frames into `dir` as `{prefix}_{index}.png`, returning the paths written.
///
/// The prefix only affects file names; [`Frame::name`] stays canonical.
pub fn write_frames(frames: &[Frame], dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(frames.len());
    for frame in frames {
        let path = dir.join(frame.file_name(prefix));
        output::save_png(&frame.image, &path)?;
        written.push(path);
    }
    info!(dir = %dir.display(), count = written.len(), "frames written");
    Ok(written)
}
