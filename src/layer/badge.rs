//! Count/state badge drawn in the top-right corner of an app key.

use super::{paint, Color, Decoration, FontBook, WHITE};
use crate::icon::{RectPx, KEY_SIZE};

const BADGE_HEIGHT: u32 = 18;
const BADGE_MIN_WIDTH: u32 = 18;
const BADGE_PADDING: u32 = 10;
const BADGE_MARGIN: u32 = 4;
const BADGE_RADIUS: f32 = 5.0;
const OUTLINE: Color = Color::new(255, 255, 255, 210);

// ============================================================================
// BadgeStyle
// ============================================================================

/// Font size and fill color chosen from the exact badge value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeStyle {
    pub font_size: f32,
    pub fill: Color,
}

impl BadgeStyle {
    pub const PRIMARY: Color = Color::new(21, 108, 196, 245);
    pub const SECONDARY: Color = Color::new(0, 138, 98, 245);
    pub const OTHER: Color = Color::new(23, 130, 153, 245);

    pub fn for_value(value: &str) -> Self {
        let font_size = if value.chars().count() == 1 { 11.0 } else { 9.0 };
        let fill = match value {
            "1" => Self::PRIMARY,
            "2" => Self::SECONDARY,
            _ => Self::OTHER,
        };
        Self { font_size, fill }
    }
}

/// Computes the badge box for text of the given measured width.
///
/// The box is right-anchored and top-anchored `BADGE_MARGIN` pixels from the
/// canvas edges, and never narrower than `BADGE_MIN_WIDTH`. A box wider than
/// the space left of its right edge starts off-canvas and is clipped.
pub fn badge_box(text_width: u32) -> RectPx {
    let width = BADGE_MIN_WIDTH.max(text_width + BADGE_PADDING);
    let right = (KEY_SIZE - BADGE_MARGIN) as i32;
    RectPx::new(right - width as i32, BADGE_MARGIN as i32, width, BADGE_HEIGHT)
}

// ============================================================================
// Badge
// ============================================================================

/// A short text token in a rounded, colored box.
///
/// An empty badge draws nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub text: String,
}

impl Badge {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn style(&self) -> BadgeStyle {
        BadgeStyle::for_value(&self.text)
    }
}

impl Decoration for Badge {
    fn markup(&self, fonts: &FontBook) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let style = self.style();
        let element = fonts.text_element(&self.text, style.font_size, &paint("fill", WHITE));
        let text = fonts.measure(&element).map(|bounds| (element, bounds));

        let text_width = text
            .as_ref()
            .map_or(0, |(_, bounds)| bounds.width().ceil() as u32);
        let rect = badge_box(text_width);

        let mut body = format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{r}" ry="{r}" {} stroke-width="1" {}/>"#,
            rect.x as f32 + 0.5,
            rect.y as f32 + 0.5,
            rect.width - 1,
            rect.height - 1,
            paint("fill", style.fill),
            paint("stroke", OUTLINE),
            r = BADGE_RADIUS - 0.5,
        );

        if let Some((element, bounds)) = text {
            let text_height = bounds.height().ceil() as u32;
            // Horizontally exact, vertically centered with a 1px upward bias.
            let left = rect.x + (rect.width.saturating_sub(text_width) / 2) as i32;
            let top = rect.y + (rect.height as i32 - text_height as i32) / 2 - 1;
            body.push_str(&format!(
                r#"<g transform="translate({} {})">{element}</g>"#,
                left as f32 - bounds.x(),
                top as f32 - bounds.y(),
            ));
        }

        Some(body)
    }
}
