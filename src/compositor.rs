//! In-memory key image assembly.
//!
//! The [`Compositor`] never touches the filesystem except to decode a glyph
//! raster it is explicitly handed. It owns the font book so text decorations
//! share one set of loaded faces for the whole invocation.

use std::path::Path;

use image::DynamicImage;

use crate::error::Result;
use crate::icon::Canvas;
use crate::layer::raster::paste_raster_glyph;
use crate::layer::{Badge, Color, Decoration, FontBook, Glyph, SelectionRing};
use crate::Role;

/// Assembles key images from a base canvas and decoration layers.
#[derive(Debug, Clone)]
pub struct Compositor {
    fonts: FontBook,
}

impl Compositor {
    /// Creates a compositor, loading the preferred font file if present.
    pub fn new(font_path: &Path) -> Self {
        Self::with_fonts(FontBook::load(font_path))
    }

    pub fn with_fonts(fonts: FontBook) -> Self {
        Self { fonts }
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Normalizes a decoded source to a key canvas, or returns a solid black
    /// canvas when there is no source.
    pub fn build_base_canvas(source: Option<&DynamicImage>) -> Canvas {
        match source {
            Some(image) => Canvas::from_image(image),
            None => Canvas::black(),
        }
    }

    /// Draws the gold selection outline.
    pub fn draw_selection_ring(&self, canvas: &mut Canvas) {
        SelectionRing::default().apply(canvas, &self.fonts);
    }

    /// Draws a badge in the top-right corner. Empty badges are a no-op.
    pub fn draw_badge(&self, canvas: &mut Canvas, badge: &str) {
        Badge::new(badge).apply(canvas, &self.fonts);
    }

    /// Draws the procedural glyph for a role.
    ///
    /// `label` overrides the role's default text for roles that render as text.
    pub fn draw_glyph(&self, canvas: &mut Canvas, role: &Role, label: &str, color: Color) {
        Glyph::new(role.glyph_shape(label), color).apply(canvas, &self.fonts);
    }

    /// Pastes a rasterized vector icon onto the center of the canvas.
    ///
    /// On error the canvas is unchanged and the caller should fall back to
    /// [`draw_glyph`](Self::draw_glyph).
    pub fn paste_raster_glyph(&self, canvas: &mut Canvas, raster: &Path) -> Result<()> {
        paste_raster_glyph(canvas, raster)
    }

    /// Applies the app-key decorations: optional ring, then badge.
    pub fn decorate_app(&self, canvas: &mut Canvas, badge: &str, selected: bool) {
        if selected {
            self.draw_selection_ring(canvas);
        }
        self.draw_badge(canvas, badge);
    }
}
