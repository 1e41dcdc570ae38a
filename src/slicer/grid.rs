//! Grid slicing: every `cell_width x cell_height` cell is one frame

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use super::{Slicer, SlicerConfig};
use crate::error::{Result, StudioError};

/// Default cell edge in pixels
pub const DEFAULT_CELL_SIZE: u32 = 16;

/// Grid props as supplied by a caller. Signed so that `<= 0` can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridProps {
    #[serde(alias = "cellWidth", alias = "width", default = "default_cell")]
    pub cell_width: i64,
    #[serde(alias = "cellHeight", alias = "height", default = "default_cell")]
    pub cell_height: i64,
}

fn default_cell() -> i64 {
    DEFAULT_CELL_SIZE as i64
}

impl Default for GridProps {
    fn default() -> Self {
        Self { cell_width: default_cell(), cell_height: default_cell() }
    }
}

/// Fixed-size cell slicer.
///
/// ```
/// use spritecut::slicer::{GridSlicer, Slicer};
///
/// let grid = GridSlicer::new(16, 16).unwrap();
/// let sheet = image::RgbaImage::new(32, 16);
/// assert!(grid.is_top_left_of_sprite(16, 0, &sheet));
/// assert!(grid.is_right_edge_of_sprite(15, 0, &sheet));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSlicer {
    cell_width: u32,
    cell_height: u32,
}

impl GridSlicer {
    pub const NAME: &'static str = "Slice by Grid";

    /// # Errors
    ///
    /// `InvalidConfiguration` unless both dimensions are positive and fit in `u32`.
    pub fn new(cell_width: i64, cell_height: i64) -> Result<Self> {
        Ok(Self {
            cell_width: positive_dimension("cell_width", cell_width)?,
            cell_height: positive_dimension("cell_height", cell_height)?,
        })
    }

    pub fn from_props(props: &GridProps) -> Result<Self> {
        Self::new(props.cell_width, props.cell_height)
    }

    /// A new slicer with different cell dimensions; `self` is untouched.
    pub fn with_cell_size(&self, cell_width: i64, cell_height: i64) -> Result<Self> {
        Self::new(cell_width, cell_height)
    }

    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    pub fn props(&self) -> GridProps {
        GridProps { cell_width: self.cell_width as i64, cell_height: self.cell_height as i64 }
    }
}

fn positive_dimension(field: &str, value: i64) -> Result<u32> {
    if value <= 0 {
        return Err(StudioError::invalid_configuration(format!(
            "{field} must be a positive integer, got {value}"
        )));
    }
    u32::try_from(value)
        .map_err(|_| StudioError::invalid_configuration(format!("{field} is too large: {value}")))
}

impl Default for GridSlicer {
    fn default() -> Self {
        Self { cell_width: DEFAULT_CELL_SIZE, cell_height: DEFAULT_CELL_SIZE }
    }
}

impl Slicer for GridSlicer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_top_left_of_sprite(&self, x: u32, y: u32, _image: &RgbaImage) -> bool {
        x % self.cell_width == 0 && y % self.cell_height == 0
    }

    fn is_right_edge_of_sprite(&self, x: u32, _y: u32, _image: &RgbaImage) -> bool {
        (u64::from(x) + 1) % u64::from(self.cell_width) == 0
    }

    fn is_bottom_edge_of_sprite(&self, _x: u32, y: u32, _image: &RgbaImage) -> bool {
        (u64::from(y) + 1) % u64::from(self.cell_height) == 0
    }

    fn config(&self) -> SlicerConfig {
        SlicerConfig::Grid(self.props())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_16x16() {
        let grid = GridSlicer::default();
        assert_eq!((grid.cell_width(), grid.cell_height()), (16, 16));
        assert_eq!(GridProps::default(), grid.props());
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        assert!(matches!(GridSlicer::new(0, 8), Err(StudioError::InvalidConfiguration(_))));
        assert!(matches!(GridSlicer::new(8, -3), Err(StudioError::InvalidConfiguration(_))));
        assert!(matches!(
            GridSlicer::new(i64::from(u32::MAX) + 1, 8),
            Err(StudioError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_predicates_follow_cell_arithmetic() {
        let grid = GridSlicer::new(4, 3).unwrap();
        let img = RgbaImage::new(1, 1);

        assert!(grid.is_top_left_of_sprite(0, 0, &img));
        assert!(grid.is_top_left_of_sprite(8, 6, &img));
        assert!(!grid.is_top_left_of_sprite(4, 1, &img));

        assert!(grid.is_right_edge_of_sprite(3, 0, &img));
        assert!(grid.is_right_edge_of_sprite(7, 99, &img));
        assert!(!grid.is_right_edge_of_sprite(4, 0, &img));

        assert!(grid.is_bottom_edge_of_sprite(0, 2, &img));
        assert!(!grid.is_bottom_edge_of_sprite(0, 3, &img));
    }

    #[test]
    fn test_with_cell_size_leaves_original_untouched() {
        let original = GridSlicer::new(8, 8).unwrap();
        let resized = original.with_cell_size(4, 2).unwrap();
        assert_eq!(original.cell_width(), 8);
        assert_eq!((resized.cell_width(), resized.cell_height()), (4, 2));

        assert!(original.with_cell_size(0, 2).is_err());
        assert_eq!(original.cell_height(), 8);
    }

    #[test]
    fn test_props_accept_legacy_field_names() {
        let props: GridProps = serde_json::from_str(r#"{"width": 24, "height": 12}"#).unwrap();
        assert_eq!(props, GridProps { cell_width: 24, cell_height: 12 });
        let partial: GridProps = serde_json::from_str(r#"{"cellWidth": 24}"#).unwrap();
        assert_eq!(partial.cell_height, 16);
    }
}
