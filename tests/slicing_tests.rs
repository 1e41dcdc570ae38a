//! Integration tests for slicing, effects and export through the public API.
//!
//! Sheets are generated in memory; export tests write into a temp dir.

use image::{Rgba, RgbaImage};
use spritecut::effects::{apply_all, BlindColorEffect, Effect, EffectSet};
use spritecut::export::{export_frames, write_frames};
use spritecut::session::Session;
use spritecut::slicer::{
    default_slicer, ColorLookupSlicer, GridSlicer, Slicer, SlicerConfig, SLICERS,
};
use spritecut::slicing::{slice_image, Slice};
use spritecut::StudioError;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const MAGENTA: Rgba<u8> = Rgba([255, 0, 255, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// White sheet with solid rectangles painted in `color`.
fn sheet_with_rects(width: u32, height: u32, rects: &[Slice], color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if rects.iter().any(|r| r.contains(x, y)) {
            color
        } else {
            WHITE
        }
    })
}

/// Count how many slices cover each pixel.
fn coverage(slices: &[Slice], width: u32, height: u32) -> Vec<usize> {
    let mut counts = vec![0usize; (width * height) as usize];
    for s in slices {
        for y in s.y1..=s.y2 {
            for x in s.x1..=s.x2 {
                counts[(y * width + x) as usize] += 1;
            }
        }
    }
    counts
}

/// Sets every pixel to one color; used to observe effect order.
#[derive(Debug)]
struct Fill(Rgba<u8>);

impl Effect for Fill {
    fn name(&self) -> &'static str {
        "Fill"
    }

    fn apply(&self, mut image: RgbaImage) -> RgbaImage {
        for p in image.pixels_mut() {
            *p = self.0;
        }
        image
    }
}

// ============================================================================
// Grid slicing
// ============================================================================

#[test]
fn test_grid_partitions_sheet_exactly() {
    let sheet = RgbaImage::new(40, 24);
    let slices = slice_image(&sheet, &GridSlicer::new(16, 16).unwrap());

    assert_eq!(
        slices,
        vec![
            Slice::new(0, 0, 15, 15),
            Slice::new(16, 0, 31, 15),
            Slice::new(32, 0, 39, 15),
            Slice::new(0, 16, 15, 23),
            Slice::new(16, 16, 31, 23),
            Slice::new(32, 16, 39, 23),
        ]
    );
    assert!(coverage(&slices, 40, 24).iter().all(|&c| c == 1), "every pixel exactly once");
}

#[test]
fn test_grid_ignores_pixel_content() {
    let blank = RgbaImage::new(32, 32);
    let busy = RgbaImage::from_fn(32, 32, |x, y| Rgba([x as u8, y as u8, 7, 255]));
    let grid = GridSlicer::new(8, 16).unwrap();
    assert_eq!(slice_image(&blank, &grid), slice_image(&busy, &grid));
    assert_eq!(slice_image(&blank, &grid).len(), 8);
}

#[test]
fn test_grid_rejects_non_positive_cells() {
    for (w, h) in [(0, 16), (16, 0), (-4, 4)] {
        assert!(matches!(GridSlicer::new(w, h), Err(StudioError::InvalidConfiguration(_))));
    }
}

// ============================================================================
// Color lookup slicing
// ============================================================================

#[test]
fn test_color_lookup_finds_scattered_rects() {
    let rects = [Slice::new(2, 1, 5, 3), Slice::new(9, 0, 9, 6), Slice::new(1, 6, 4, 7)];
    let sheet = sheet_with_rects(12, 8, &rects, MAGENTA);
    let slicer = ColorLookupSlicer::new(&["white"]).unwrap();

    // Raster order of top-left corners: (9,0), (2,1), (1,6)
    let slices = slice_image(&sheet, &slicer);
    assert_eq!(slices, vec![rects[1], rects[0], rects[2]]);
}

#[test]
fn test_color_lookup_slices_never_overlap() {
    let rects = [Slice::new(0, 0, 2, 2), Slice::new(4, 0, 7, 1), Slice::new(4, 3, 5, 7)];
    let sheet = sheet_with_rects(8, 8, &rects, RED);
    let slices = slice_image(&sheet, &ColorLookupSlicer::new(&["#fff"]).unwrap());

    assert!(coverage(&slices, 8, 8).iter().all(|&c| c <= 1));
    for (x, y, p) in sheet.enumerate_pixels() {
        if *p != WHITE {
            assert!(slices.iter().any(|s| s.contains(x, y)), "({x},{y}) not covered");
        }
    }
}

/// Slices stay in bounds, never share a pixel, and cover every non-white pixel.
fn assert_partitions_sprites(sheet: &RgbaImage, slices: &[Slice]) {
    let (width, height) = sheet.dimensions();
    for (i, a) in slices.iter().enumerate() {
        assert!(a.fits_within(width, height), "slice {a} out of bounds");
        for b in &slices[i + 1..] {
            assert!(!a.overlaps(b), "slices {a} and {b} overlap");
        }
    }
    for (x, y, p) in sheet.enumerate_pixels() {
        if *p != WHITE {
            assert!(slices.iter().any(|s| s.contains(x, y)), "({x},{y}) not covered");
        }
    }
}

#[test]
fn test_color_lookup_crossing_sprites_never_overlap() {
    // A vertical stroke crossed by a horizontal one
    let strokes = [Slice::new(3, 0, 3, 5), Slice::new(0, 2, 4, 2)];
    let sheet = sheet_with_rects(6, 6, &strokes, RED);
    let slices = slice_image(&sheet, &ColorLookupSlicer::new(&["#ffffff"]).unwrap());

    assert_partitions_sprites(&sheet, &slices);
    assert_eq!(slices[0], Slice::new(3, 0, 3, 5));
    assert_eq!(slices.len(), 3);
}

#[test]
fn test_color_lookup_touching_sprites_never_overlap() {
    let mut sheet = sheet_with_rects(7, 6, &[Slice::new(0, 0, 2, 2)], RED);
    for y in 1..=4 {
        for x in 3..=5 {
            sheet.put_pixel(x, y, MAGENTA);
        }
    }
    // An L-shaped stroke hugging the second block from below
    for x in 0..=5 {
        sheet.put_pixel(x, 5, RED);
    }
    sheet.put_pixel(0, 4, RED);

    let slices = slice_image(&sheet, &ColorLookupSlicer::new(&["white"]).unwrap());
    assert_partitions_sprites(&sheet, &slices);
    assert_eq!(slices[0], Slice::new(0, 0, 2, 2));
    assert_eq!(slices[1], Slice::new(3, 1, 5, 5));
}

#[test]
fn test_color_lookup_without_background_is_one_slice() {
    let sheet = RgbaImage::from_pixel(5, 3, RED);
    let slices = slice_image(&sheet, &ColorLookupSlicer::default());
    assert_eq!(slices, vec![Slice::new(0, 0, 4, 2)]);
}

#[test]
fn test_color_lookup_all_background_is_empty() {
    let sheet = RgbaImage::from_pixel(5, 3, WHITE);
    let slices = slice_image(&sheet, &ColorLookupSlicer::new(&["rgb(255 255 255)"]).unwrap());
    assert!(slices.is_empty());
}

#[test]
fn test_catalog_names_build_slicers() {
    for entry in SLICERS {
        let slicer = default_slicer(entry.name).expect("catalog entry builds");
        assert_eq!(slicer.name(), entry.name);
        let rebuilt = slicer.config().build().unwrap();
        assert_eq!(rebuilt.config(), slicer.config());
    }
    assert!(default_slicer("Slice by Hexagon").is_none());
}

// ============================================================================
// Effects
// ============================================================================

#[test]
fn test_blind_color_is_idempotent() {
    let effect = BlindColorEffect::new(&["#ff00ff"]).unwrap();
    let frame = sheet_with_rects(4, 4, &[Slice::new(1, 1, 2, 2)], MAGENTA);

    let once = effect.apply(frame.clone());
    let twice = effect.apply(once.clone());
    assert_eq!(once, twice);
    assert_eq!(*once.get_pixel(1, 1), CLEAR);
    assert_eq!(*once.get_pixel(0, 0), WHITE);
}

#[test]
fn test_effect_order_matters() {
    let blind = BlindColorEffect::new(&["red"]).unwrap();
    let fill = Fill(RED);
    let frame = RgbaImage::from_pixel(2, 2, WHITE);

    let fill_then_blind = apply_all(frame.clone(), [&fill as &dyn Effect, &blind]);
    let blind_then_fill = apply_all(frame, [&blind as &dyn Effect, &fill]);

    assert!(fill_then_blind.pixels().all(|p| *p == CLEAR));
    assert!(blind_then_fill.pixels().all(|p| *p == RED));
}

#[test]
fn test_effect_set_replace_keeps_position() {
    let mut set = EffectSet::new();
    set.set("first", Box::new(Fill(RED)));
    set.set("second", Box::new(BlindColorEffect::new(&["red"]).unwrap()));
    set.set("first", Box::new(Fill(WHITE)));

    assert_eq!(set.names().collect::<Vec<_>>(), vec!["first", "second"]);
    let out = set.apply(RgbaImage::new(1, 1));
    assert_eq!(*out.get_pixel(0, 0), WHITE);
}

#[test]
fn test_empty_effect_set_is_identity() {
    let frame = RgbaImage::from_fn(3, 3, |x, y| Rgba([x as u8, y as u8, 1, 200]));
    assert_eq!(EffectSet::new().apply(frame.clone()), frame);
}

// ============================================================================
// Session and export
// ============================================================================

#[test]
fn test_session_preconditions_leave_state_untouched() {
    let mut session = Session::new();
    assert!(matches!(session.slice(), Err(StudioError::NoSourceImage)));
    assert!(matches!(session.export_frames(), Err(StudioError::NoSourceImage)));

    session.start_editing_new_spritesheet(RgbaImage::new(4, 4));
    let err = session.slice().unwrap_err();
    assert!(err.is_precondition());
    assert!(matches!(err, StudioError::NoSlicerSelected));
    assert!(session.slices().is_empty());
    assert!(matches!(session.export_frames(), Err(StudioError::NoSlicesComputed)));
}

#[test]
fn test_session_reslice_replaces_slices() {
    let mut session = Session::with_spritesheet(RgbaImage::new(32, 32));
    session.configure_slicer(&SlicerConfig::Grid(Default::default())).unwrap();
    assert_eq!(session.slice().unwrap().len(), 4);

    session.set_slicer(Box::new(GridSlicer::new(32, 8).unwrap()));
    assert_eq!(session.slice().unwrap().len(), 4);
    assert_eq!(session.slices()[3], Slice::new(0, 24, 31, 31));
}

#[test]
fn test_export_end_to_end_to_directory() {
    let rects = [Slice::new(0, 0, 3, 3), Slice::new(6, 2, 7, 5)];
    let mut sheet = sheet_with_rects(8, 6, &rects, RED);
    sheet.put_pixel(1, 1, MAGENTA);

    let slices = slice_image(&sheet, &ColorLookupSlicer::new(&["white"]).unwrap());
    assert_eq!(slices, rects.to_vec());

    let mut effects = EffectSet::new();
    effects.set(BlindColorEffect::NAME, Box::new(BlindColorEffect::new(&["magenta"]).unwrap()));
    let frames = export_frames(Some(&sheet), &slices, &effects).unwrap();
    assert_eq!(frames[0].image.dimensions(), (4, 4));
    assert_eq!(frames[1].image.dimensions(), (2, 4));
    assert_eq!(*frames[0].image.get_pixel(1, 1), CLEAR);
    assert_eq!(*frames[0].image.get_pixel(0, 0), RED);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/frames");
    let paths = write_frames(&frames, &out, "frame").unwrap();
    assert_eq!(paths, vec![out.join("frame_0.png"), out.join("frame_1.png")]);

    let decoded = image::open(&paths[1]).unwrap().to_rgba8();
    assert_eq!(decoded, frames[1].image);
}
