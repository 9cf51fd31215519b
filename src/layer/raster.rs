//! Pasting a pre-rasterized glyph onto the center of a canvas.

use std::path::Path;

use image::RgbaImage;

use super::svg::composite_over;
use crate::error::Result;
use crate::icon::{Canvas, KEY_SIZE};

/// Position that centers an image of the given size on the canvas.
pub fn centered_origin(width: u32, height: u32) -> (i32, i32) {
    (
        (KEY_SIZE as i32 - width as i32) / 2,
        (KEY_SIZE as i32 - height as i32) / 2,
    )
}

/// Alpha-composites a decoded glyph onto the center of the canvas.
pub fn paste_centered(canvas: &mut Canvas, glyph: &RgbaImage) {
    let (x, y) = centered_origin(glyph.width(), glyph.height());
    composite_over(canvas.image_mut(), glyph, x, y);
}

/// Decodes the raster at `path` and pastes it onto the center of the canvas.
///
/// The file is fully decoded before the canvas is touched, so a missing or
/// corrupt file leaves the canvas unchanged.
pub fn paste_raster_glyph(canvas: &mut Canvas, path: &Path) -> Result<()> {
    let glyph = image::open(path)?.to_rgba8();
    paste_centered(canvas, &glyph);
    Ok(())
}
