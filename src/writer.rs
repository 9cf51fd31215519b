//! Atomic replacement of the output file.
//!
//! Every write goes to a uniquely named temporary file in the destination's
//! directory and is then renamed over the destination, so a concurrent
//! reader sees either the old complete file or the new complete file. The
//! temporary file is removed on every failure path when the
//! [`NamedTempFile`] guard drops; removal errors are ignored.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use tempfile::{Builder, NamedTempFile};

use crate::error::{RenderError, Result};

/// Encodes `image` as PNG and atomically replaces `output` with it.
pub fn write_png_atomic(image: &RgbaImage, output: &Path) -> Result<()> {
    replace_atomic(output, |file| {
        let mut writer = BufWriter::new(file);
        image.write_to(&mut writer, ImageFormat::Png)?;
        writer.flush()?;
        Ok(())
    })
}

/// Atomically replaces `output` with a byte copy of `source`.
pub fn copy_file_atomic(source: &Path, output: &Path) -> Result<()> {
    replace_atomic(output, |file| {
        let mut reader = File::open(source)?;
        std::io::copy(&mut reader, file)?;
        Ok(())
    })
}

fn replace_atomic<F>(output: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let name = output
        .file_name()
        .ok_or_else(|| RenderError::InvalidOutput(output.to_path_buf()))?;
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp: NamedTempFile = Builder::new()
        .prefix(&format!(".{}.", name.to_string_lossy()))
        .suffix(".tmp")
        .tempfile_in(parent)?;

    fill(temp.as_file_mut())?;
    temp.as_file().sync_all()?;
    temp.persist(output)?;

    log::debug!("wrote {}", output.display());
    Ok(())
}
