//! SVG rendering utilities using resvg/usvg.
//!
//! Every decoration describes itself as an SVG fragment in canvas
//! coordinates. This module turns those fragments into RGBA overlays,
//! measures text, and composites overlays onto the canvas.

use std::path::Path;
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::fontdb::{self, Database};
use resvg::usvg::{Node, Options, Rect, Tree};

// ============================================================================
// FontBook
// ============================================================================

/// Bold sans face compiled into the binary, used when the preferred file is missing.
const BUILTIN_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");
const BUILTIN_FAMILY: &str = "DejaVu Sans";

/// The fonts available to text decorations.
///
/// The preferred face is loaded from a fixed file. When that file is missing
/// the built-in face is used instead, at the same declared sizes.
#[derive(Clone)]
pub struct FontBook {
    db: Arc<Database>,
    family: String,
}

impl FontBook {
    /// Loads the preferred font file, falling back to the built-in face.
    pub fn load(preferred: &Path) -> Self {
        let mut db = Database::new();
        let preferred_family = match db.load_font_file(preferred) {
            Ok(()) => {
                let family = first_family(&db);
                if family.is_none() {
                    log::warn!("{} contains no usable faces", preferred.display());
                }
                family
            }
            Err(e) => {
                log::debug!("preferred font {} unavailable: {}", preferred.display(), e);
                None
            }
        };

        // Also covers glyphs the preferred face lacks.
        let builtin = load_builtin(&mut db);
        let family = match preferred_family {
            Some(family) => {
                log::debug!("loaded preferred font {}", preferred.display());
                family
            }
            None => {
                log::debug!("using built-in font {}", builtin);
                builtin
            }
        };
        Self::from_database(db, family)
    }

    /// A font book holding only the built-in face.
    pub fn builtin() -> Self {
        let mut db = Database::new();
        let family = load_builtin(&mut db);
        Self::from_database(db, family)
    }

    fn from_database(db: Database, family: String) -> Self {
        Self {
            db: Arc::new(db),
            family,
        }
    }

    /// The family name text is set in.
    pub fn family(&self) -> &str {
        &self.family
    }

    fn options(&self) -> Options<'static> {
        let mut opts = Options::default();
        opts.fontdb = Arc::clone(&self.db);
        opts.font_family = self.family.clone();
        opts
    }

    /// Builds a bold `<text>` element with its baseline origin at (0, 0).
    pub fn text_element(&self, text: &str, size: f32, fill: &str) -> String {
        format!(
            r#"<text x="0" y="0" font-family="{}" font-size="{}" font-weight="bold" {}>{}</text>"#,
            escape_xml(&self.family),
            size,
            fill,
            escape_xml(text)
        )
    }

    /// Measures the glyph-outline bounds of a text element produced by [`text_element`](Self::text_element).
    ///
    /// Returns `None` if nothing visible was laid out, such as an all-space string.
    pub fn measure(&self, element: &str) -> Option<Rect> {
        let markup = wrap_svg(element);
        let tree = Tree::from_str(&markup, &self.options()).ok()?;
        text_bounds(tree.root())
    }

    /// Renders canvas-sized SVG markup using this font book.
    pub fn render(&self, body: &str, size: u32) -> Option<RgbaImage> {
        render_svg_with_options(&wrap_svg(body), size, &self.options())
    }
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("faces", &self.db.len())
            .field("family", &self.family)
            .finish()
    }
}

fn load_builtin(db: &mut Database) -> String {
    let ids = db.load_font_source(fontdb::Source::Binary(Arc::new(BUILTIN_FONT)));
    ids.first()
        .and_then(|id| db.face(*id))
        .and_then(|face| face.families.first())
        .map_or_else(|| BUILTIN_FAMILY.to_owned(), |(name, _)| name.clone())
}

fn first_family(db: &Database) -> Option<String> {
    db.faces()
        .find_map(|face: &fontdb::FaceInfo| face.families.first().map(|(name, _)| name.clone()))
}

fn text_bounds(group: &resvg::usvg::Group) -> Option<Rect> {
    group.children().iter().find_map(|node| match node {
        Node::Text(text) => Some(text.flattened().bounding_box()),
        Node::Group(inner) => text_bounds(inner),
        _ => None,
    })
}

// ============================================================================
// SVG Rendering
// ============================================================================

/// Wraps an SVG fragment in a root element sized to the key canvas.
pub fn wrap_svg(body: &str) -> String {
    let size = crate::icon::KEY_SIZE;
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">{body}</svg>"#
    )
}

/// Renders an SVG string to an RGBA image at the specified size.
///
/// The SVG is scaled to fit within `size x size` pixels while preserving
/// aspect ratio (the larger dimension will be `size`).
///
/// Returns `None` if the SVG cannot be parsed or rendered.
fn render_svg_with_options(svg_data: &str, size: u32, opts: &Options) -> Option<RgbaImage> {
    let tree = Tree::from_str(svg_data, opts).ok()?;

    let svg_size = tree.size();
    let scale = (size as f32) / svg_size.width().max(svg_size.height());
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)?;
    let transform = Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Some(pixmap_to_rgba_image(&pixmap))
}

/// Escapes text for use inside SVG character data or attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());

    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        // tiny_skia uses premultiplied alpha
        let (r, g, b, a) = unpremultiply(src.red(), src.green(), src.blue(), src.alpha());
        *dst = Rgba([r, g, b, a]);
    }

    img
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

// ============================================================================
// Compositing
// ============================================================================

/// Composites a source image onto a destination image at the specified position.
///
/// Uses standard alpha blending (source over destination).
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    let dest_width = dest.width() as i32;
    let dest_height = dest.height() as i32;

    for (sx, sy, src_pixel) in src.enumerate_pixels() {
        let dx = x + sx as i32;
        let dy = y + sy as i32;

        if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
            continue;
        }
        if src_pixel[3] == 0 {
            continue;
        }

        let dst_pixel = dest.get_pixel(dx as u32, dy as u32);
        let blended = alpha_blend(*src_pixel, *dst_pixel);
        dest.put_pixel(dx as u32, dy as u32, blended);
    }
}

/// Alpha blends two RGBA pixels (source over destination).
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;

    let out_a = sa + da * (1.0 - sa);

    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

// ============================================================================
// Tests
// ============================================================================
