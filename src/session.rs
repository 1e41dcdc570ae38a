//! Editing session for one spritesheet
//!
//! A [`Session`] owns the loaded sheet together with everything derived from
//! it: the chosen slicer, the computed slices and the configured effects.
//! Loading a new sheet replaces the whole session at once, so nothing from
//! the previous sheet survives.

use std::path::Path;

use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::effects::{Effect, EffectConfig, EffectSet};
use crate::error::{Result, StudioError};
use crate::export::{self, Frame};
use crate::slicer::{Slicer, SlicerConfig};
use crate::slicing::{slice_image, Slice};

#[derive(Debug, Default)]
pub struct Session {
    spritesheet: Option<RgbaImage>,
    slicer: Option<Box<dyn Slicer>>,
    slices: Vec<Slice>,
    effects: EffectSet,
}

impl Session {
    /// An empty session with no sheet loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh session editing `spritesheet`.
    pub fn with_spritesheet(spritesheet: RgbaImage) -> Self {
        Self { spritesheet: Some(spritesheet), ..Self::default() }
    }

    /// Start editing a new sheet. Slicer, slices and effects are reset together.
    pub fn start_editing_new_spritesheet(&mut self, spritesheet: RgbaImage) {
        info!(width = spritesheet.width(), height = spritesheet.height(), "new spritesheet");
        *self = Self::with_spritesheet(spritesheet);
    }

    /// Decode the image at `path` and start editing it.
    pub fn load_spritesheet(&mut self, path: &Path) -> Result<()> {
        let image = image::open(path)?.to_rgba8();
        debug!(path = %path.display(), "decoded spritesheet");
        self.start_editing_new_spritesheet(image);
        Ok(())
    }

    pub fn spritesheet(&self) -> Option<&RgbaImage> {
        self.spritesheet.as_ref()
    }

    pub fn slicer(&self) -> Option<&dyn Slicer> {
        self.slicer.as_deref()
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn effects(&self) -> &EffectSet {
        &self.effects
    }

    /// Select a slicer. Previously computed slices are kept until the next [`Session::slice`].
    pub fn set_slicer(&mut self, slicer: Box<dyn Slicer>) {
        debug!(slicer = slicer.name(), "slicer selected");
        self.slicer = Some(slicer);
    }

    /// Build a slicer from boundary props and select it.
    ///
    /// On error the current slicer is left in place.
    pub fn configure_slicer(&mut self, config: &SlicerConfig) -> Result<()> {
        let slicer = config.build()?;
        self.set_slicer(slicer);
        Ok(())
    }

    /// Run the slicing engine over the loaded sheet.
    ///
    /// # Errors
    ///
    /// `NoSourceImage` or `NoSlicerSelected` if the session is incomplete.
    /// Session state is untouched in that case.
    pub fn slice(&mut self) -> Result<&[Slice]> {
        let Some(image) = self.spritesheet.as_ref() else {
            warn!("slice requested without a spritesheet");
            return Err(StudioError::NoSourceImage);
        };
        let Some(slicer) = self.slicer.as_deref() else {
            warn!("slice requested without a slicer");
            return Err(StudioError::NoSlicerSelected);
        };

        self.slices = slice_image(image, slicer);
        Ok(&self.slices)
    }

    /// Insert or replace an effect under `name`.
    pub fn set_effect(&mut self, name: impl Into<String>, effect: Box<dyn Effect>) {
        self.effects.set(name, effect);
    }

    /// Build an effect from boundary props and store it under `name`.
    ///
    /// On error the effect set is left unchanged.
    pub fn configure_effect(&mut self, name: impl Into<String>, config: &EffectConfig) -> Result<()> {
        let effect = config.build()?;
        self.set_effect(name, effect);
        Ok(())
    }

    /// Remove the effect stored under `name`. Returns whether one was removed.
    pub fn remove_effect(&mut self, name: &str) -> bool {
        self.effects.remove(name).is_some()
    }

    /// Crop every slice and run it through the effect pipeline.
    ///
    /// # Errors
    ///
    /// `NoSourceImage` or `NoSlicesComputed`.
    pub fn export_frames(&self) -> Result<Vec<Frame>> {
        export::export_frames(self.spritesheet.as_ref(), &self.slices, &self.effects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{BlindColorEffect, BlindColorProps};
    use crate::slicer::{GridProps, GridSlicer};
    use image::Rgba;

    fn sheet() -> RgbaImage {
        RgbaImage::from_pixel(32, 16, Rgba([255, 0, 0, 255]))
    }

    #[test]
    fn test_slice_without_image_is_reported_noop() {
        let mut session = Session::new();
        session.set_slicer(Box::new(GridSlicer::default()));
        assert!(matches!(session.slice(), Err(StudioError::NoSourceImage)));
        assert!(session.slices().is_empty());
        assert!(session.slicer().is_some());
        assert!(session.spritesheet().is_none());
    }

    #[test]
    fn test_slice_without_slicer_is_reported_noop() {
        let mut session = Session::with_spritesheet(sheet());
        assert!(matches!(session.slice(), Err(StudioError::NoSlicerSelected)));
        assert!(session.slices().is_empty());
    }

    #[test]
    fn test_failed_slice_keeps_previous_slices() {
        let mut session = Session::with_spritesheet(sheet());
        session.set_slicer(Box::new(GridSlicer::default()));
        assert_eq!(session.slice().unwrap().len(), 2);

        let bad = SlicerConfig::Grid(GridProps { cell_width: -1, cell_height: 4 });
        assert!(session.configure_slicer(&bad).is_err());
        assert_eq!(session.slicer().map(|s| s.config()), Some(GridSlicer::default().config()));
        assert_eq!(session.slices().len(), 2);
    }

    #[test]
    fn test_new_spritesheet_resets_everything() {
        let mut session = Session::with_spritesheet(sheet());
        session.set_slicer(Box::new(GridSlicer::default()));
        session.slice().unwrap();
        session.set_effect("blind", Box::new(BlindColorEffect::default()));

        session.start_editing_new_spritesheet(RgbaImage::new(8, 8));
        assert_eq!(session.spritesheet().map(|s| s.dimensions()), Some((8, 8)));
        assert!(session.slicer().is_none());
        assert!(session.slices().is_empty());
        assert!(session.effects().is_empty());
    }

    #[test]
    fn test_export_without_slices_fails() {
        let session = Session::with_spritesheet(sheet());
        assert!(matches!(session.export_frames(), Err(StudioError::NoSlicesComputed)));
        assert!(matches!(Session::new().export_frames(), Err(StudioError::NoSourceImage)));
    }

    #[test]
    fn test_full_flow() {
        let mut session = Session::with_spritesheet(sheet());
        session
            .configure_slicer(&SlicerConfig::Grid(GridProps { cell_width: 16, cell_height: 16 }))
            .unwrap();
        session.slice().unwrap();
        session
            .configure_effect(
                BlindColorEffect::NAME,
                &EffectConfig::BlindColor(BlindColorProps { blind_colors: vec!["red".into()] }),
            )
            .unwrap();

        let frames = session.export_frames().unwrap();
        assert_eq!(frames.len(), 2);
        assert!(frames.iter().all(|f| f.image.pixels().all(|p| p.0[3] == 0)));

        assert!(session.remove_effect(BlindColorEffect::NAME));
        assert!(!session.remove_effect(BlindColorEffect::NAME));
        let frames = session.export_frames().unwrap();
        assert_eq!(*frames[1].image.get_pixel(15, 15), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_bad_effect_config_keeps_effects() {
        let mut session = Session::with_spritesheet(sheet());
        let bad = EffectConfig::BlindColor(BlindColorProps { blind_colors: vec!["#xyz".into()] });
        assert!(matches!(
            session.configure_effect("blind", &bad),
            Err(StudioError::InvalidColorFormat(_))
        ));
        assert!(session.effects().is_empty());
    }
}
