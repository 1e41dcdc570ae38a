//! PNG output: encoding, frame naming and writing

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use std::io;
use std::path::Path;
use thiserror::Error;

/// Default stem for exported frame files
pub const DEFAULT_FRAME_PREFIX: &str = "frame";

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, OutputError> {
    let mut png_data = Vec::new();
    PngEncoder::new(&mut png_data).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgba8,
    )?;
    Ok(png_data)
}

/// Save an RGBA image to a PNG file, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    ensure_parent_dir(path)?;
    image.save(path)?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// File name of the frame at `index`: `{prefix}_{index}.png`.
///
/// ```
/// use spritecut::output::frame_file_name;
///
/// assert_eq!(frame_file_name("frame", 0), "frame_0.png");
/// assert_eq!(frame_file_name("walk", 12), "walk_12.png");
/// ```
pub fn frame_file_name(prefix: &str, index: usize) -> String {
    format!("{}_{}.png", prefix, index)
}
