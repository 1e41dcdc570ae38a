//! Raster-scan slicing engine
//!
//! Walks the sheet top-to-bottom, left-to-right. A pixel not already covered
//! by a discovered slice and accepted by [`Slicer::is_top_left_of_sprite`]
//! seeds a new slice, which is grown right along its first row and down
//! along its first column until the slicer reports an edge or the sheet ends.
//!
//! This is a greedy bounding-box expansion, not a flood fill: the right and
//! bottom edges are found independently and the interior of the rectangle is
//! never inspected. It is exact for grid-aligned sprites and for sprites on
//! a solid background; irregular or disconnected shapes can be under- or
//! over-captured.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::slicer::Slicer;

/// An axis-aligned rectangle with inclusive bounds `(x1, y1)-(x2, y2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slice {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl Slice {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        debug_assert!(x1 <= x2 && y1 <= y2, "inverted slice bounds");
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> u32 {
        self.x2 - self.x1 + 1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1 + 1
    }

    /// Inclusive containment test.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.x1 <= x && x <= self.x2 && self.y1 <= y && y <= self.y2
    }

    /// True if the two slices share at least one pixel.
    pub fn overlaps(&self, other: &Slice) -> bool {
        self.x1 <= other.x2 && other.x1 <= self.x2 && self.y1 <= other.y2 && other.y1 <= self.y2
    }

    /// True if the slice lies entirely inside a `width x height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2 && self.x2 < width && self.y2 < height
    }
}

impl std::fmt::Display for Slice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}-{},{} ({}x{})", self.x1, self.y1, self.x2, self.y2, self.width(), self.height())
    }
}

/// Slice `image` with `slicer`, returning slices in discovery order.
///
/// ```
/// use spritecut::slicer::GridSlicer;
/// use spritecut::slicing::{slice_image, Slice};
///
/// let sheet = image::RgbaImage::new(32, 16);
/// let slices = slice_image(&sheet, &GridSlicer::new(16, 16).unwrap());
/// assert_eq!(slices, vec![Slice::new(0, 0, 15, 15), Slice::new(16, 0, 31, 15)]);
/// ```
#[tracing::instrument(
    skip_all,
    fields(slicer = slicer.name(), width = image.width(), height = image.height())
)]
pub fn slice_image<S: Slicer + ?Sized>(image: &RgbaImage, slicer: &S) -> Vec<Slice> {
    let (width, height) = image.dimensions();
    let mut slices: Vec<Slice> = Vec::new();

    if width == 0 || height == 0 {
        return slices;
    }

    for y in 0..height {
        for x in 0..width {
            // Linear containment check; cost grows with the slice count
            if slices.iter().any(|s| s.contains(x, y)) {
                continue;
            }
            if !slicer.is_top_left_of_sprite(x, y, image) {
                continue;
            }

            // Rightward growth also stops in front of an earlier slice so that
            // slices never overlap. Downward growth cannot cross one: a slice
            // covering column `x` further down would already cover `(x, y)`.
            let mut x2 = x;
            while x2 < width - 1
                && !slicer.is_right_edge_of_sprite(x2, y, image)
                && !slices.iter().any(|s| s.contains(x2 + 1, y))
            {
                x2 += 1;
            }

            let mut y2 = y;
            while !slicer.is_bottom_edge_of_sprite(x, y2, image) && y2 < height - 1 {
                y2 += 1;
            }

            let slice = Slice::new(x, y, x2, y2);
            debug!(index = slices.len(), %slice, "found slice");
            slices.push(slice);
        }
    }

    info!(count = slices.len(), "slicing complete");
    slices
}
