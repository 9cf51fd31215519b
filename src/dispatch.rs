//! Mode dispatch: maps a render request to the resolver, rasterizer,
//! compositor and writer sequence, and owns every fallback decision.
//!
//! ```text
//! App:     bundle icon ─► generic icon ─► exit 2
//!              │
//!              └─► rasterize 72px ─► canvas ─► ring ─► badge ─► write
//!
//! Control: idle ─► black ─► write
//!          other ─► vector icon ─► rasterize 44px ─► paste ─► write
//!                        └─(any failure)─► procedural glyph ─► write
//! ```

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::RendererConfig;
use crate::error::{RenderError, Result};
use crate::icon::KEY_SIZE;
use crate::rasterizer::Rasterize;
use crate::role::Role;
use crate::source::{PropertyReader, SourceResolver};
use crate::writer::copy_file_atomic;

#[cfg(feature = "compositor")]
use crate::compositor::Compositor;
#[cfg(feature = "compositor")]
use crate::icon::Canvas;
#[cfg(feature = "compositor")]
use crate::layer::WHITE;
#[cfg(feature = "compositor")]
use crate::writer::write_png_atomic;

/// Edge length of a vector icon pasted onto a control key.
pub const CONTROL_ICON_SIZE: u32 = 44;

// ============================================================================
// ExitStatus
// ============================================================================

/// Process status returned by every terminal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    /// Malformed invocation, or an unexpected failure writing the output.
    Failure = 1,
    /// No icon source could be obtained for an app key.
    IconUnavailable = 2,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        std::process::ExitCode::from(status.code())
    }
}

// ============================================================================
// RenderRequest
// ============================================================================

/// The resolved parameters of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderRequest {
    App {
        bundle: PathBuf,
        badge: String,
        selected: bool,
        output: PathBuf,
    },
    Control {
        role: Role,
        label: String,
        output: PathBuf,
    },
}

impl RenderRequest {
    pub fn output(&self) -> &Path {
        match self {
            Self::App { output, .. } | Self::Control { output, .. } => output,
        }
    }
}

// ============================================================================
// Backend
// ============================================================================

/// The rendering capability available to this process.
///
/// Chosen once at startup and passed explicitly to the [`Renderer`].
#[derive(Debug, Clone)]
pub enum Backend {
    /// Full decoration support.
    #[cfg(feature = "compositor")]
    Full(Compositor),
    /// No raster library: app keys copy the converted icon verbatim.
    MinimalCopy,
}

impl Backend {
    /// Selects the best backend compiled into this build.
    #[cfg(feature = "compositor")]
    pub fn probe(config: &RendererConfig) -> Self {
        Self::Full(Compositor::new(&config.font_path))
    }

    #[cfg(not(feature = "compositor"))]
    pub fn probe(_config: &RendererConfig) -> Self {
        log::warn!("built without the compositor feature, keys will not be decorated");
        Self::MinimalCopy
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Runs render requests against a set of collaborators.
pub struct Renderer<R, P> {
    resolver: SourceResolver<P>,
    rasterizer: R,
    backend: Backend,
}

impl<R: Rasterize, P: PropertyReader> Renderer<R, P> {
    pub fn new(config: RendererConfig, reader: P, rasterizer: R, backend: Backend) -> Self {
        Self {
            resolver: SourceResolver::new(config, reader),
            rasterizer,
            backend,
        }
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Renders one request and maps the outcome to an exit status.
    pub fn run(&self, request: &RenderRequest) -> ExitStatus {
        let result = match request {
            RenderRequest::App {
                bundle,
                badge,
                selected,
                output,
            } => self.render_app(bundle, badge, *selected, output),
            RenderRequest::Control {
                role,
                label,
                output,
            } => self.render_control(role, label, output),
        };

        match result {
            Ok(()) => ExitStatus::Success,
            Err(RenderError::IconUnavailable) => {
                log::warn!("no icon available for {}", request.output().display());
                ExitStatus::IconUnavailable
            }
            Err(e) => {
                log::error!("failed to render {}: {}", request.output().display(), e);
                ExitStatus::Failure
            }
        }
    }

    fn work_dir(&self) -> Result<TempDir> {
        Ok(tempfile::Builder::new()
            .prefix(&self.resolver.config().work_dir_prefix)
            .tempdir()?)
    }

    /// Produces a 72px PNG of the app's icon (or the generic icon) in `dest`.
    fn extract_app_icon(&self, bundle: &Path, dest: &Path) -> Result<()> {
        if bundle.is_dir() {
            if let Some(icon) = self.resolver.resolve_app_icon(bundle) {
                match self.rasterizer.rasterize(&icon, KEY_SIZE, dest) {
                    Ok(()) => return Ok(()),
                    Err(e) => log::warn!("{}", e),
                }
            }
        }

        let generic = self
            .resolver
            .generic_app_icon()
            .ok_or(RenderError::IconUnavailable)?;
        log::debug!("using generic icon {}", generic.display());
        self.rasterizer
            .rasterize(&generic, KEY_SIZE, dest)
            .map_err(|e| {
                log::warn!("{}", e);
                RenderError::IconUnavailable
            })
    }

    fn render_app(&self, bundle: &Path, badge: &str, selected: bool, output: &Path) -> Result<()> {
        let work = self.work_dir()?;
        let extracted = work.path().join("app.png");
        self.extract_app_icon(bundle, &extracted)?;

        match &self.backend {
            #[cfg(feature = "compositor")]
            Backend::Full(compositor) => {
                let source = image::open(&extracted).map_err(|e| {
                    log::warn!("converted icon is not decodable: {}", e);
                    RenderError::IconUnavailable
                })?;
                let mut canvas = Compositor::build_base_canvas(Some(&source));
                compositor.decorate_app(&mut canvas, badge, selected);
                write_png_atomic(canvas.image(), output)
            }
            Backend::MinimalCopy => {
                log::debug!("copying undecorated icon (badge {:?}, selected {})", badge, selected);
                copy_file_atomic(&extracted, output)
            }
        }
    }

    fn render_control(&self, role: &Role, label: &str, output: &Path) -> Result<()> {
        match &self.backend {
            #[cfg(feature = "compositor")]
            Backend::Full(compositor) => {
                if *role == Role::Idle {
                    return write_png_atomic(Canvas::black().image(), output);
                }

                let mut canvas = Compositor::build_base_canvas(None);
                if let Err(e) = self.paste_control_icon(compositor, &mut canvas, role) {
                    log::debug!("drawing {} procedurally: {}", role, e);
                    compositor.draw_glyph(&mut canvas, role, label, WHITE);
                }
                write_png_atomic(canvas.image(), output)
            }
            Backend::MinimalCopy => {
                log::debug!("no compositor for control key {} ({:?})", role, label);
                self.render_app(Path::new(""), "", false, output)
            }
        }
    }

    #[cfg(feature = "compositor")]
    fn paste_control_icon(&self, compositor: &Compositor, canvas: &mut Canvas, role: &Role) -> Result<()> {
        let svg = self
            .resolver
            .resolve_control_icon(role)
            .ok_or(RenderError::IconUnavailable)?;
        let work = self.work_dir()?;
        let png = work.path().join("icon.png");
        self.rasterizer.rasterize(&svg, CONTROL_ICON_SIZE, &png)?;
        compositor.paste_raster_glyph(canvas, &png)
    }
}
