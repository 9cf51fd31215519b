//! Procedural control glyphs, used when no vector icon could be pasted.

use super::{paint, Color, Decoration, FontBook};
use crate::icon::KEY_SIZE;

const STROKE_WIDTH: u32 = 6;
const MID: u32 = KEY_SIZE / 2;

/// What a procedural glyph depicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphShape {
    ArrowLeft,
    ArrowRight,
    /// Angular undo arrow.
    Back,
    /// Open circle with an arrowhead at its end.
    Refresh,
    /// Centered text.
    Label(String),
}

/// A procedural glyph in a single foreground color.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub shape: GlyphShape,
    pub color: Color,
}

impl Glyph {
    pub fn new(shape: GlyphShape, color: Color) -> Self {
        Self { shape, color }
    }

    /// Font size for a text label: 18 for four characters or fewer, else 14.
    pub fn label_size(label: &str) -> f32 {
        if label.chars().count() <= 4 { 18.0 } else { 14.0 }
    }

    fn line(&self, points: &[(u32, u32)]) -> String {
        let points: Vec<String> = points.iter().map(|(x, y)| format!("{x},{y}")).collect();
        format!(
            r#"<polyline points="{}" fill="none" stroke-width="{STROKE_WIDTH}" stroke-linejoin="miter" {}/>"#,
            points.join(" "),
            paint("stroke", self.color)
        )
    }

    fn triangle(&self, points: [(u32, u32); 3]) -> String {
        let [(x0, y0), (x1, y1), (x2, y2)] = points;
        format!(
            r#"<polygon points="{x0},{y0} {x1},{y1} {x2},{y2}" {}/>"#,
            paint("fill", self.color)
        )
    }

    fn arc(&self) -> String {
        // Inscribed in [16,16]-[56,56] with the stroke kept inside the box.
        let radius = 20.0 - STROKE_WIDTH as f32 / 2.0;
        let point = |degrees: f32| {
            let rad = degrees.to_radians();
            (
                MID as f32 + radius * rad.cos(),
                MID as f32 + radius * rad.sin(),
            )
        };
        // 295 degrees, clockwise on screen.
        let (sx, sy) = point(30.0);
        let (ex, ey) = point(325.0);
        format!(
            r#"<path d="M {sx:.3} {sy:.3} A {radius} {radius} 0 1 1 {ex:.3} {ey:.3}" fill="none" stroke-width="{STROKE_WIDTH}" {}/>"#,
            paint("stroke", self.color)
        )
    }

    fn label(&self, text: &str, fonts: &FontBook) -> Option<String> {
        let element = fonts.text_element(text, Self::label_size(text), &paint("fill", self.color));
        let bounds = fonts.measure(&element)?;
        let left = (KEY_SIZE as i32 - bounds.width().ceil() as i32) / 2;
        let top = (KEY_SIZE as i32 - bounds.height().ceil() as i32) / 2;
        Some(format!(
            r#"<g transform="translate({} {})">{element}</g>"#,
            left as f32 - bounds.x(),
            top as f32 - bounds.y(),
        ))
    }
}

impl Decoration for Glyph {
    fn markup(&self, fonts: &FontBook) -> Option<String> {
        match &self.shape {
            GlyphShape::ArrowLeft => Some(
                self.line(&[(50, MID), (26, MID)])
                    + &self.triangle([(22, MID), (34, MID - 10), (34, MID + 10)]),
            ),
            GlyphShape::ArrowRight => Some(
                self.line(&[(22, MID), (46, MID)])
                    + &self.triangle([(50, MID), (38, MID - 10), (38, MID + 10)]),
            ),
            GlyphShape::Back => Some(
                self.line(&[(52, 20), (30, 20), (30, 50)])
                    + &self.triangle([(18, 20), (32, 10), (32, 30)]),
            ),
            GlyphShape::Refresh => {
                Some(self.arc() + &self.triangle([(54, 18), (60, 30), (47, 28)]))
            }
            GlyphShape::Label(text) => self.label(text, fonts),
        }
    }
}
