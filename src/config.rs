//! Well-known filesystem locations consumed by the renderer.
//!
//! [`RendererConfig::default`] yields the fixed macOS locations. A JSON file
//! can override any subset of them:
//!
//! ```
//! use keycap_renderer::RendererConfig;
//!
//! let config = RendererConfig::from_json(r#"{ "fontPath": "/tmp/font.ttf" }"#).unwrap();
//! assert_eq!(config.font_path.to_str(), Some("/tmp/font.ttf"));
//! assert!(config.generic_app_icon.ends_with("GenericApplicationIcon.icns"));
//! ```

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

/// Environment variable naming an optional JSON override file.
pub const CONFIG_ENV: &str = "KEYCAP_RENDERER_CONFIG";

const FONT_PATH: &str = "/System/Library/Fonts/Supplemental/Arial Bold.ttf";
const GENERIC_APP_ICON: &str =
    "/System/Library/CoreServices/CoreTypes.bundle/Contents/Resources/GenericApplicationIcon.icns";
const ICON_PACK: &str = "com.elgato.StreamDeck/Plugins/com.elgato.keycreator.sdPlugin/static/com.elgato.defaulticonswhite.sdIconPack/icons";

/// Paths and naming used by one render invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RendererConfig {
    /// Preferred font file for badges and labels.
    pub font_path: PathBuf,

    /// Icon used when an app bundle has no usable icon of its own.
    pub generic_app_icon: PathBuf,

    /// Icon pack location relative to an application-support directory.
    pub icon_pack: PathBuf,

    /// Application-support directory of the current account profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_data_dir: Option<PathBuf>,

    /// Home directory taken from the environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_dir: Option<PathBuf>,

    /// Prefix of the per-invocation scratch directory.
    pub work_dir_prefix: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from(FONT_PATH),
            generic_app_icon: PathBuf::from(GENERIC_APP_ICON),
            icon_pack: PathBuf::from(ICON_PACK),
            profile_data_dir: BaseDirs::new().map(|dirs| dirs.data_dir().to_path_buf()),
            home_dir: std::env::var_os("HOME").map(PathBuf::from),
            work_dir_prefix: "keycap-".to_owned(),
        }
    }
}

impl RendererConfig {
    /// Parses a (possibly partial) JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Loads the override named by [`CONFIG_ENV`], or the defaults.
    ///
    /// An unreadable or malformed file is reported and ignored.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring {}: {}", Path::new(&path).display(), e);
                Self::default()
            }
        }
    }

    fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// Candidate icon-pack directories in lookup order: the profile's
    /// application-support directory, then `$HOME/Library/Application Support`.
    pub fn icon_pack_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::with_capacity(2);
        if let Some(data) = &self.profile_data_dir {
            dirs.push(data.join(&self.icon_pack));
        }
        if let Some(home) = &self.home_dir {
            let fallback = home.join("Library/Application Support").join(&self.icon_pack);
            if !dirs.contains(&fallback) {
                dirs.push(fallback);
            }
        }
        dirs
    }
}
