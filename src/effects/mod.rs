//! Post-processing effects applied to each extracted frame
//!
//! An [`Effect`] is an immutable pixel transform. Effects are collected in an
//! [`EffectSet`] keyed by name; insertion order is application order, and
//! [`apply_all`] folds a frame through them.

pub mod blind_color;

use std::fmt;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::slicer::CatalogEntry;

pub use blind_color::{BlindColorEffect, BlindColorProps};

/// A pixel transform from one frame to another.
pub trait Effect: fmt::Debug + Send + Sync {
    /// Catalog name of the effect (see [`EFFECTS`]).
    fn name(&self) -> &'static str;

    /// Transform `image`. The input buffer is consumed.
    fn apply(&self, image: RgbaImage) -> RgbaImage;
}

/// Effect configuration as it crosses the UI / config-file boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum EffectConfig {
    BlindColor(BlindColorProps),
}

impl EffectConfig {
    /// Validate the props and build the effect they describe.
    pub fn build(&self) -> Result<Box<dyn Effect>> {
        Ok(match self {
            EffectConfig::BlindColor(props) => Box::new(BlindColorEffect::from_props(props)?),
        })
    }
}

/// All built-in effects, in display order.
pub const EFFECTS: &[CatalogEntry] = &[CatalogEntry {
    name: BlindColorEffect::NAME,
    description: "Ignore colors and turn them into transparent pixels. \
                  Useful for removing solid backgrounds",
}];

/// Create an effect with default props from its catalog name.
pub fn default_effect(name: &str) -> Option<Box<dyn Effect>> {
    match name {
        BlindColorEffect::NAME => Some(Box::new(BlindColorEffect::default())),
        _ => None,
    }
}

/// Fold `image` through `effects` in iteration order.
///
/// An empty sequence is the identity.
pub fn apply_all<'a, E, I>(image: RgbaImage, effects: I) -> RgbaImage
where
    E: Effect + ?Sized + 'a,
    I: IntoIterator<Item = &'a E>,
{
    effects.into_iter().fold(image, |img, effect| effect.apply(img))
}

/// Named effects in application order.
///
/// Setting an existing name replaces that effect without moving it; a new
/// name goes to the end.
#[derive(Debug, Default)]
pub struct EffectSet {
    entries: Vec<(String, Box<dyn Effect>)>,
}

impl EffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the effect stored under `name`.
    pub fn set(&mut self, name: impl Into<String>, effect: Box<dyn Effect>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = effect,
            None => self.entries.push((name, effect)),
        }
    }

    /// Remove the effect stored under `name`, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Effect>> {
        let pos = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Effect> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, e)| e.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Names in application order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Run every effect over `image` in application order.
    pub fn apply(&self, image: RgbaImage) -> RgbaImage {
        apply_all(image, self.entries.iter().map(|(_, e)| e.as_ref()))
    }
}
