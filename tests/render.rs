//! End-to-end renders through the dispatcher with fake OS collaborators.
#![cfg(feature = "compositor")]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use keycap_renderer::layer::{BadgeStyle, Color};
use keycap_renderer::{
    Backend, Compositor, ExitStatus, PropertyReader, Rasterize, RenderError, RenderRequest, Renderer,
    RendererConfig, Role,
};
use tempfile::{tempdir, TempDir};

const APP_COLOR: [u8; 4] = [40, 90, 160, 255];
const PACK_COLOR: [u8; 4] = [200, 200, 200, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

/// Stands in for `sips`: icon containers become solid app-colored squares,
/// vector icons become solid grey squares.
#[derive(Default)]
struct FakeRasterizer {
    fail_vectors: bool,
    calls: RefCell<Vec<(PathBuf, u32)>>,
}

impl Rasterize for FakeRasterizer {
    fn rasterize(&self, source: &Path, size: u32, dest: &Path) -> keycap_renderer::Result<()> {
        self.calls.borrow_mut().push((source.to_path_buf(), size));
        let is_vector = source.extension().is_some_and(|e| e == "svg");
        if !source.is_file() || (is_vector && self.fail_vectors) {
            return Err(RenderError::Rasterize {
                tool: "fake",
                source_path: source.to_path_buf(),
                reason: "refused".into(),
            });
        }
        let color = if is_vector { PACK_COLOR } else { APP_COLOR };
        RgbaImage::from_pixel(size, size, Rgba(color)).save(dest)?;
        Ok(())
    }
}

struct IconFile(&'static str);

impl PropertyReader for IconFile {
    fn read_string(&self, _plist: &Path, _key: &str) -> String {
        self.0.to_owned()
    }
}

struct Fixture {
    dir: TempDir,
    config: RendererConfig,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let config = RendererConfig {
            generic_app_icon: dir.path().join("Generic.icns"),
            icon_pack: "pack".into(),
            profile_data_dir: Some(dir.path().join("profile")),
            home_dir: Some(dir.path().join("home")),
            ..RendererConfig::default()
        };
        Self { dir, config }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn bundle(&self) -> PathBuf {
        let bundle = self.path("Foo.app");
        let resources = bundle.join("Contents/Resources");
        fs::create_dir_all(&resources).unwrap();
        fs::write(resources.join("Foo.icns"), b"icns").unwrap();
        bundle
    }

    fn install_pack_icon(&self, file: &str) {
        let pack = self.path("profile/pack");
        fs::create_dir_all(&pack).unwrap();
        fs::write(pack.join(file), b"<svg/>").unwrap();
    }

    fn renderer<'a>(&self, rasterizer: &'a FakeRasterizer) -> Renderer<&'a FakeRasterizer, IconFile> {
        let compositor = Compositor::new(&self.config.font_path);
        Renderer::new(
            self.config.clone(),
            IconFile("Foo"),
            rasterizer,
            Backend::Full(compositor),
        )
    }
}

fn control(role: &str, label: &str, output: &Path) -> RenderRequest {
    RenderRequest::Control {
        role: Role::from(role),
        label: label.into(),
        output: output.to_path_buf(),
    }
}

fn app(bundle: &Path, badge: &str, selected: bool, output: &Path) -> RenderRequest {
    RenderRequest::App {
        bundle: bundle.to_path_buf(),
        badge: badge.into(),
        selected,
        output: output.to_path_buf(),
    }
}

fn load(path: &Path) -> RgbaImage {
    let img = image::open(path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (72, 72));
    img
}

/// `color` blended over an opaque background, as the compositor does.
fn over(color: Color, background: [u8; 4]) -> [u8; 3] {
    let a = color.alpha as f32 / 255.0;
    let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
    [
        mix(color.red, background[0]),
        mix(color.green, background[1]),
        mix(color.blue, background[2]),
    ]
}

fn near(actual: &Rgba<u8>, expected: [u8; 3]) -> bool {
    actual.0[..3]
        .iter()
        .zip(expected)
        .all(|(a, e)| (*a as i16 - e as i16).abs() <= 3)
}

#[test]
fn idle_is_solid_black_regardless_of_label() {
    let fx = Fixture::new();
    let rasterizer = FakeRasterizer::default();
    let renderer = fx.renderer(&rasterizer);

    for label in ["", "ignored", "LONG LABEL"] {
        let out = fx.path("idle.png");
        assert_eq!(renderer.run(&control("idle", label, &out)), ExitStatus::Success);
        assert!(load(&out).pixels().all(|p| p.0 == BLACK));
    }
    assert!(rasterizer.calls.borrow().is_empty());
}

#[test]
fn page_prev_without_vector_icon_draws_left_chevron() {
    let fx = Fixture::new();
    let rasterizer = FakeRasterizer::default();
    let out = fx.path("prev.png");

    assert_eq!(
        fx.renderer(&rasterizer).run(&control("page_prev", "", &out)),
        ExitStatus::Success
    );

    let img = load(&out);
    assert_eq!(img.get_pixel(40, 36).0, WHITE, "shaft");
    assert_eq!(img.get_pixel(26, 36).0, WHITE, "tip");
    assert_eq!(img.get_pixel(55, 36).0, BLACK);
    // No text anywhere above or below the arrow.
    assert!(img
        .enumerate_pixels()
        .filter(|(_, y, _)| *y < 24 || *y > 48)
        .all(|(_, _, p)| p.0 == BLACK));
}

#[test]
fn vector_icon_is_pasted_centered() {
    let fx = Fixture::new();
    fx.install_pack_icon("IconChevronsLeft-White.svg");
    let rasterizer = FakeRasterizer::default();
    let out = fx.path("prev.png");

    assert_eq!(
        fx.renderer(&rasterizer).run(&control("page_prev", "", &out)),
        ExitStatus::Success
    );

    let img = load(&out);
    assert_eq!(img.get_pixel(14, 14).0, PACK_COLOR);
    assert_eq!(img.get_pixel(57, 57).0, PACK_COLOR);
    assert_eq!(img.get_pixel(13, 13).0, BLACK);
    assert_eq!(img.get_pixel(40, 36).0, PACK_COLOR, "no procedural glyph on top");
    assert_eq!(rasterizer.calls.borrow()[0].1, 44);
}

#[test]
fn failed_vector_conversion_falls_back_to_glyph() {
    let fx = Fixture::new();
    fx.install_pack_icon("IconChevronRight-White.svg");
    let rasterizer = FakeRasterizer {
        fail_vectors: true,
        ..FakeRasterizer::default()
    };
    let out = fx.path("right.png");

    assert_eq!(
        fx.renderer(&rasterizer).run(&control("move_right", "", &out)),
        ExitStatus::Success
    );

    let img = load(&out);
    assert_eq!(img.get_pixel(30, 36).0, WHITE);
    assert_eq!(img.get_pixel(14, 14).0, BLACK);
    assert_eq!(rasterizer.calls.borrow().len(), 1);
}

#[test]
fn unknown_role_draws_centered_label() {
    let fx = Fixture::new();
    let rasterizer = FakeRasterizer::default();
    let out = fx.path("custom.png");

    assert_eq!(
        fx.renderer(&rasterizer).run(&control("custom", "HI", &out)),
        ExitStatus::Success
    );

    let img = load(&out);
    let lit: Vec<(u32, u32)> = img
        .enumerate_pixels()
        .filter(|(_, _, p)| p[0] > 128)
        .map(|(x, y, _)| (x, y))
        .collect();
    assert!(!lit.is_empty());
    let (min_x, max_x) = (lit.iter().map(|p| p.0).min().unwrap(), lit.iter().map(|p| p.0).max().unwrap());
    let (min_y, max_y) = (lit.iter().map(|p| p.1).min().unwrap(), lit.iter().map(|p| p.1).max().unwrap());
    assert!(min_x > 10 && max_x < 62, "label fits comfortably");
    assert!(min_y > 20 && max_y < 52, "label is vertically centered");
}

#[test]
fn app_icon_with_ring_and_badge() {
    let fx = Fixture::new();
    let bundle = fx.bundle();
    let rasterizer = FakeRasterizer::default();
    let out = fx.path("app.png");

    assert_eq!(
        fx.renderer(&rasterizer).run(&app(&bundle, "2", true, &out)),
        ExitStatus::Success
    );

    let img = load(&out);
    assert_eq!(img.get_pixel(36, 36).0, APP_COLOR, "icon body");
    assert_eq!(img.get_pixel(3, 36).0, [255, 214, 10, 255], "selection ring");
    assert!(
        near(img.get_pixel(59, 19), over(BadgeStyle::SECONDARY, APP_COLOR)),
        "teal-green badge, got {:?}",
        img.get_pixel(59, 19)
    );
    assert_eq!(
        rasterizer.calls.borrow()[0],
        (bundle.join("Contents/Resources/Foo.icns"), 72)
    );
}

#[test]
fn ring_only_when_selected() {
    let fx = Fixture::new();
    let bundle = fx.bundle();
    let rasterizer = FakeRasterizer::default();
    let out = fx.path("app.png");

    assert_eq!(
        fx.renderer(&rasterizer).run(&app(&bundle, "", false, &out)),
        ExitStatus::Success
    );
    let img = load(&out);
    assert!(img.pixels().all(|p| p.0 == APP_COLOR));
}

#[test]
fn badge_colors_by_value() {
    let fx = Fixture::new();
    let bundle = fx.bundle();
    let rasterizer = FakeRasterizer::default();
    let renderer = fx.renderer(&rasterizer);

    for (badge, color) in [
        ("1", BadgeStyle::PRIMARY),
        ("2", BadgeStyle::SECONDARY),
        ("3", BadgeStyle::OTHER),
        ("AB", BadgeStyle::OTHER),
    ] {
        let out = fx.path(&format!("badge-{badge}.png"));
        assert_eq!(renderer.run(&app(&bundle, badge, false, &out)), ExitStatus::Success);
        let pixel = *load(&out).get_pixel(59, 19);
        assert!(near(&pixel, over(color, APP_COLOR)), "badge {badge:?} got {pixel:?}");
    }
}

#[test]
fn missing_bundle_uses_generic_icon() {
    let fx = Fixture::new();
    fs::write(&fx.config.generic_app_icon, b"icns").unwrap();
    let rasterizer = FakeRasterizer::default();
    let out = fx.path("app.png");

    assert_eq!(
        fx.renderer(&rasterizer).run(&app(&fx.path("Nope.app"), "", false, &out)),
        ExitStatus::Success
    );
    assert_eq!(rasterizer.calls.borrow()[0].0, fx.config.generic_app_icon);
}

#[test]
fn unobtainable_icon_keeps_previous_output() {
    let fx = Fixture::new();
    let rasterizer = FakeRasterizer::default();
    let out = fx.path("keys/app.png");
    fs::create_dir_all(out.parent().unwrap()).unwrap();
    fs::write(&out, b"previous complete image").unwrap();

    assert_eq!(
        fx.renderer(&rasterizer).run(&app(&fx.path("Nope.app"), "1", true, &out)),
        ExitStatus::IconUnavailable
    );

    assert_eq!(fs::read(&out).unwrap(), b"previous complete image");
    let leftovers: Vec<_> = fs::read_dir(out.parent().unwrap()).unwrap().collect();
    assert_eq!(leftovers.len(), 1, "no temporary files left behind");
}

#[test]
fn identical_inputs_give_identical_files() {
    let fx = Fixture::new();
    let bundle = fx.bundle();
    let rasterizer = FakeRasterizer::default();
    let renderer = fx.renderer(&rasterizer);

    let first = fx.path("one.png");
    let second = fx.path("two.png");
    assert_eq!(renderer.run(&app(&bundle, "12", true, &first)), ExitStatus::Success);
    assert_eq!(renderer.run(&app(&bundle, "12", true, &second)), ExitStatus::Success);
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());

    let first = fx.path("ctl-one.png");
    let second = fx.path("ctl-two.png");
    assert_eq!(renderer.run(&control("refresh", "", &first)), ExitStatus::Success);
    assert_eq!(renderer.run(&control("refresh", "", &second)), ExitStatus::Success);
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}
