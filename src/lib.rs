//! Spritecut - Library for slicing spritesheets into frames
//!
//! This library provides functionality to:
//! - Parse CSS color strings into a canonical, comparable form
//! - Detect frame rectangles in a spritesheet with a pluggable [`slicer::Slicer`]
//! - Post-process frames through an ordered [`effects::EffectSet`]
//! - Export frames as PNG images
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use spritecut::session::Session;
//! use spritecut::slicer::GridSlicer;
//!
//! let mut session = Session::with_spritesheet(RgbaImage::from_pixel(32, 16, Rgba([255, 0, 0, 255])));
//! session.set_slicer(Box::new(GridSlicer::new(16, 16).unwrap()));
//! assert_eq!(session.slice().unwrap().len(), 2);
//! assert_eq!(session.export_frames().unwrap()[1].name, "frame_1.png");
//! ```

pub mod cli;
pub mod color;
pub mod config;
pub mod effects;
pub mod error;
pub mod export;
pub mod logging;
pub mod output;
pub mod session;
pub mod slicer;
pub mod slicing;

pub use error::{Result, StudioError};
