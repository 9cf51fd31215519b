//! Decoration layers drawn on top of a key canvas.
//!
//! Each decoration describes itself as an SVG fragment in canvas
//! coordinates. [`Decoration::apply`] renders that fragment with resvg and
//! alpha-composites the result onto the canvas, so every layer shares one
//! rasterization and blending path.
//!
//! # Layer order
//!
//! ```text
//! Base canvas (resized icon or solid black)
//!     │
//!     ▼
//! ┌───────────────┐
//! │ Raster glyph  │ ◄── control keys, when a vector icon was converted
//! │  or  Glyph    │ ◄── control keys, procedural fallback
//! └──────┬────────┘
//!        ▼
//! ┌───────────────┐
//! │ Selection ring│ ◄── app keys, selected flag set
//! └──────┬────────┘
//!        ▼
//! ┌───────────────┐
//! │     Badge     │ ◄── app keys, non-empty badge
//! └───────────────┘
//! ```

pub mod badge;
pub mod glyph;
pub mod raster;
pub mod ring;
pub mod svg;

pub use badge::{Badge, BadgeStyle};
pub use glyph::{Glyph, GlyphShape};
pub use ring::SelectionRing;
pub use svg::FontBook;

use palette::Srgba;

use crate::icon::{Canvas, KEY_SIZE};

// ============================================================================
// Color
// ============================================================================

/// An 8-bit sRGB color with straight alpha.
pub type Color = Srgba<u8>;

/// Opaque white, the foreground of every control key.
pub const WHITE: Color = Color::new(255, 255, 255, 255);

/// Formats a color as SVG paint attributes for `fill` or `stroke`.
pub fn paint(attr: &str, color: Color) -> String {
    let opacity = color.alpha as f32 / 255.0;
    format!(
        r##"{attr}="#{:02x}{:02x}{:02x}" {attr}-opacity="{}""##,
        color.red, color.green, color.blue, opacity
    )
}

// ============================================================================
// Decoration Trait
// ============================================================================

/// A visual element layered onto a canvas.
pub trait Decoration {
    /// Returns the SVG fragment for this decoration, in canvas coordinates.
    ///
    /// `None` means there is nothing to draw.
    fn markup(&self, fonts: &FontBook) -> Option<String>;

    /// Draws the decoration onto the canvas.
    ///
    /// Leaves the canvas untouched when there is nothing to draw or the
    /// markup fails to render.
    fn apply(&self, canvas: &mut Canvas, fonts: &FontBook) {
        let Some(body) = self.markup(fonts) else {
            return;
        };
        match fonts.render(&body, KEY_SIZE) {
            Some(overlay) => svg::composite_over(canvas.image_mut(), &overlay, 0, 0),
            None => log::warn!("decoration markup failed to render"),
        }
    }
}
