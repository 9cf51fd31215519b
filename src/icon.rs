//! Key canvas and pixel geometry.
//!
//! Every key image is a fixed 72x72 RGBA raster, no matter what size the
//! source artwork was.

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};

/// Edge length of a key image in pixels.
pub const KEY_SIZE: u32 = 72;

/// A rectangle defined in pixel coordinates.
///
/// The origin may lie outside the canvas; drawing clips to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the canvas
    pub x: i32,
    /// Y offset from the top edge of the canvas
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl RectPx {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Returns true if the pixel at (px, py) lies inside the rectangle.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// A key image under construction.
///
/// The invariant is that the wrapped buffer is always exactly
/// `KEY_SIZE x KEY_SIZE`; every constructor enforces it.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    data: RgbaImage,
}

impl Canvas {
    /// Creates a canvas filled with a single color.
    pub fn solid(color: Rgba<u8>) -> Self {
        Self {
            data: RgbaImage::from_pixel(KEY_SIZE, KEY_SIZE, color),
        }
    }

    /// Creates the opaque black background used by control keys.
    pub fn black() -> Self {
        Self::solid(Rgba([0, 0, 0, 255]))
    }

    /// Resizes arbitrary artwork onto a canvas with a Lanczos filter.
    ///
    /// Non-square sources are stretched; the source tools already hand us
    /// square icons.
    pub fn from_image(source: &DynamicImage) -> Self {
        let data = if source.width() == KEY_SIZE && source.height() == KEY_SIZE {
            source.to_rgba8()
        } else {
            source
                .resize_exact(KEY_SIZE, KEY_SIZE, FilterType::Lanczos3)
                .to_rgba8()
        };
        Self { data }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.data
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.data
    }

    pub fn into_image(self) -> RgbaImage {
        self.data
    }

    /// Returns true if every pixel is opaque black.
    pub fn is_blank(&self) -> bool {
        self.data.pixels().all(|p| p.0 == [0, 0, 0, 255])
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::black()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_px_edges() {
        let rect = RectPx::new(50, 4, 18, 18);
        assert_eq!(rect.right(), 68);
        assert_eq!(rect.bottom(), 22);
        assert!(rect.contains(50, 4));
        assert!(rect.contains(67, 21));
        assert!(!rect.contains(68, 21));

        let clipped = RectPx::new(-12, 4, 80, 18);
        assert_eq!(clipped.right(), 68);
        assert!(clipped.contains(0, 10));
        assert!(!clipped.contains(68, 10));
    }

    #[test]
    fn black_canvas_is_opaque() {
        let canvas = Canvas::black();
        assert_eq!(canvas.image().dimensions(), (KEY_SIZE, KEY_SIZE));
        assert!(canvas.is_blank());
    }

    #[test]
    fn from_image_normalizes_size() {
        for (w, h) in [(16, 16), (512, 512), (100, 40)] {
            let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([10, 20, 30, 255])));
            let canvas = Canvas::from_image(&source);
            assert_eq!(canvas.image().dimensions(), (KEY_SIZE, KEY_SIZE));
        }
    }

    #[test]
    fn from_image_converts_to_rgba() {
        let source = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(32, 32, image::Rgb([200, 0, 0])));
        let canvas = Canvas::from_image(&source);
        let center = canvas.image().get_pixel(36, 36);
        assert_eq!(center[3], 255);
        assert!(center[0] > 190);
    }
}
