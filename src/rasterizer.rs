//! Conversion of icon containers and vector files to PNG via an OS utility.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{RenderError, Result};

/// Converts a source file to a square PNG of a given size.
///
/// On success `dest` holds a decodable raster no larger than `size` on its
/// long edge. On failure the caller must not trust whatever is at `dest`.
pub trait Rasterize {
    fn rasterize(&self, source: &Path, size: u32, dest: &Path) -> Result<()>;
}

/// Shells out to macOS `sips`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SipsRasterizer;

impl SipsRasterizer {
    const TOOL: &'static str = "sips";
}

impl Rasterize for SipsRasterizer {
    fn rasterize(&self, source: &Path, size: u32, dest: &Path) -> Result<()> {
        let fail = |reason: String| RenderError::Rasterize {
            tool: Self::TOOL,
            source_path: source.to_path_buf(),
            reason,
        };

        let status = Command::new(Self::TOOL)
            .args(["-s", "format", "png", "-Z", &size.to_string()])
            .arg(source)
            .arg("--out")
            .arg(dest)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| fail(e.to_string()))?;

        if !status.success() {
            // A failed run may leave a truncated file behind.
            let _ = std::fs::remove_file(dest);
            return Err(fail(format!("exited with {status}")));
        }
        if !dest.is_file() {
            return Err(fail("no output written".to_owned()));
        }

        log::debug!("converted {} to {}px", source.display(), size);
        Ok(())
    }
}

impl<R: Rasterize + ?Sized> Rasterize for &R {
    fn rasterize(&self, source: &Path, size: u32, dest: &Path) -> Result<()> {
        (**self).rasterize(source, size, dest)
    }
}
