//! Selection ring drawn around a selected app key.

use super::{paint, Color, Decoration, FontBook};
use crate::icon::KEY_SIZE;

/// A rounded outline inset from the canvas edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRing {
    /// Distance from each canvas edge to the outer edge of the stroke.
    pub inset: u32,
    /// Outer corner radius.
    pub radius: f32,
    pub stroke_width: f32,
    pub color: Color,
}

impl SelectionRing {
    pub const GOLD: Color = Color::new(255, 214, 10, 255);
}

impl Default for SelectionRing {
    fn default() -> Self {
        Self {
            inset: 2,
            radius: 9.0,
            stroke_width: 3.0,
            color: Self::GOLD,
        }
    }
}

impl Decoration for SelectionRing {
    fn markup(&self, _fonts: &FontBook) -> Option<String> {
        // The stroke is centered on the path, so pull the path inward by half
        // a stroke to keep the whole outline inside the inset box.
        let half = self.stroke_width / 2.0;
        let origin = self.inset as f32 + half;
        let side = (KEY_SIZE - 2 * self.inset) as f32 - self.stroke_width;
        let rx = (self.radius - half).max(0.0);

        Some(format!(
            r#"<rect x="{origin}" y="{origin}" width="{side}" height="{side}" rx="{rx}" ry="{rx}" fill="none" stroke-width="{}" {}/>"#,
            self.stroke_width,
            paint("stroke", self.color),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::Canvas;
    use image::Rgba;

    #[test]
    fn ring_covers_edges_only() {
        let mut canvas = Canvas::solid(Rgba([200, 0, 0, 255]));
        SelectionRing::default().apply(&mut canvas, &FontBook::builtin());

        let img = canvas.image();
        for (x, y) in [(3, 36), (4, 36), (36, 3), (68, 36), (36, 68)] {
            assert_eq!(img.get_pixel(x, y).0, [255, 214, 10, 255], "ring at ({x}, {y})");
        }
        for (x, y) in [(0, 36), (36, 36), (36, 10), (71, 71)] {
            assert_eq!(img.get_pixel(x, y).0, [200, 0, 0, 255], "background at ({x}, {y})");
        }
    }

    #[test]
    fn ring_corners_are_rounded() {
        let mut canvas = Canvas::black();
        SelectionRing::default().apply(&mut canvas, &FontBook::builtin());
        // The square corner of the inset box lies outside a 9px radius.
        assert_eq!(canvas.image().get_pixel(2, 2).0, [0, 0, 0, 255]);
    }
}
