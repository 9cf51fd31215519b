//! Locating the base artwork for a key.
//!
//! App keys use the icon container declared by the application bundle.
//! Control keys use a vector icon from the default icon pack, or nothing, in
//! which case the compositor draws a procedural glyph.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::RendererConfig;
use crate::role::Role;

const ICON_EXTENSION: &str = "icns";
const ICON_FILE_KEY: &str = "CFBundleIconFile";
const FALLBACK_ICONS: [&str; 2] = ["AppIcon.icns", "app.icns"];

// ============================================================================
// PropertyReader
// ============================================================================

/// Reads a named string value from a structured property file.
///
/// Any failure yields an empty string, which callers treat as "absent".
pub trait PropertyReader {
    fn read_string(&self, plist: &Path, key: &str) -> String;
}

/// Shells out to macOS `defaults read`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultsReader;

impl PropertyReader for DefaultsReader {
    fn read_string(&self, plist: &Path, key: &str) -> String {
        let output = Command::new("defaults")
            .arg("read")
            .arg(plist)
            .arg(key)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output();

        match output {
            Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).trim().to_owned(),
            Ok(out) => {
                log::debug!("defaults read {} {} exited with {}", plist.display(), key, out.status);
                String::new()
            }
            Err(e) => {
                log::debug!("defaults unavailable: {}", e);
                String::new()
            }
        }
    }
}

impl<P: PropertyReader + ?Sized> PropertyReader for &P {
    fn read_string(&self, plist: &Path, key: &str) -> String {
        (**self).read_string(plist, key)
    }
}

// ============================================================================
// SourceResolver
// ============================================================================

/// Resolves key roles and bundles to files on disk.
#[derive(Debug, Clone)]
pub struct SourceResolver<P> {
    config: RendererConfig,
    reader: P,
}

impl<P: PropertyReader> SourceResolver<P> {
    pub fn new(config: RendererConfig, reader: P) -> Self {
        Self { config, reader }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Finds the icon container of an application bundle.
    ///
    /// Tries the declared `CFBundleIconFile` (coerced to `.icns`), then the
    /// conventional `AppIcon.icns` and `app.icns` in that order.
    pub fn resolve_app_icon(&self, bundle: &Path) -> Option<PathBuf> {
        let contents = bundle.join("Contents");
        let resources = contents.join("Resources");

        // `defaults` takes the plist path without its extension.
        let declared = self.reader.read_string(&contents.join("Info"), ICON_FILE_KEY);
        if !declared.is_empty() {
            let mut icon = resources.join(&declared);
            let is_container = icon
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(ICON_EXTENSION));
            if !is_container {
                icon.set_extension(ICON_EXTENSION);
            }
            if icon.is_file() {
                return Some(icon);
            }
            log::debug!("declared icon {} not found", icon.display());
        }

        FALLBACK_ICONS
            .iter()
            .map(|name| resources.join(name))
            .find(|path| path.is_file())
    }

    /// The system-wide generic application icon, if present.
    pub fn generic_app_icon(&self) -> Option<PathBuf> {
        let path = &self.config.generic_app_icon;
        path.is_file().then(|| path.clone())
    }

    /// Finds the vector icon for a control role in the default icon pack.
    pub fn resolve_control_icon(&self, role: &Role) -> Option<PathBuf> {
        let file = role.icon_file()?;
        self.config
            .icon_pack_dirs()
            .into_iter()
            .map(|dir| dir.join(file))
            .find(|path| path.is_file())
    }
}
