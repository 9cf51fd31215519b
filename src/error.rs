//! Error type shared by every stage of the render pipeline.

use std::path::PathBuf;

/// Errors raised while resolving, converting, compositing or writing a key image.
///
/// Library functions propagate these with `?`. Only the dispatcher turns them
/// into a fallback tier or an [`ExitStatus`](crate::ExitStatus).
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to move temporary file into place: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("`{tool}` failed to convert {source_path}: {reason}")]
    Rasterize {
        tool: &'static str,
        source_path: PathBuf,
        reason: String,
    },

    #[error("no icon source could be found")]
    IconUnavailable,

    #[error("output path {0} has no file name")]
    InvalidOutput(PathBuf),

    #[error("failed to render SVG markup")]
    Svg,
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
