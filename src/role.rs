//! Symbolic identities of control keys and their fixed lookup tables.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "compositor")]
use crate::layer::GlyphShape;

/// The symbolic identity of a control key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Home,
    PagePrev,
    PageNext,
    MoveLeft,
    MoveRight,
    ModeBack,
    Refresh,
    /// An unused key, rendered as plain black.
    Idle,
    SelectedPreview,
    /// Any role name not listed above.
    Other(String),
}

/// Role name → vector icon file in the default icon pack.
const ICON_FILES: &[(&str, &str)] = &[
    ("home", "IconHome-White.svg"),
    ("page_prev", "IconChevronsLeft-White.svg"),
    ("page_next", "IconChevronsRight-White.svg"),
    ("move_left", "IconChevronLeft-White.svg"),
    ("move_right", "IconChevronRight-White.svg"),
    ("mode_back", "IconUndo-White.svg"),
    ("refresh", "IconRefresh-White.svg"),
];

/// Role name → text drawn when the caller passes no label.
const DEFAULT_LABELS: &[(&str, &str)] = &[
    ("page_prev", "<"),
    ("page_next", ">"),
    ("refresh", "R"),
    ("mode_back", "BACK"),
    ("move_left", "LEFT"),
    ("move_right", "RIGHT"),
    ("selected_preview", "APP"),
];

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

impl Role {
    /// The role's wire name, as passed on the command line.
    pub fn name(&self) -> &str {
        match self {
            Self::Home => "home",
            Self::PagePrev => "page_prev",
            Self::PageNext => "page_next",
            Self::MoveLeft => "move_left",
            Self::MoveRight => "move_right",
            Self::ModeBack => "mode_back",
            Self::Refresh => "refresh",
            Self::Idle => "idle",
            Self::SelectedPreview => "selected_preview",
            Self::Other(name) => name,
        }
    }

    /// File name of the role's icon in the default icon pack, if it has one.
    pub fn icon_file(&self) -> Option<&'static str> {
        lookup(ICON_FILES, self.name())
    }

    /// Text drawn for this role when no label is given.
    pub fn default_label(&self) -> String {
        lookup(DEFAULT_LABELS, self.name())
            .map(str::to_owned)
            .unwrap_or_else(|| self.name().to_uppercase())
    }

    /// The text actually drawn: `label` if non-empty, else the default.
    pub fn display_label(&self, label: &str) -> String {
        if label.is_empty() {
            self.default_label()
        } else {
            label.to_owned()
        }
    }

    /// The procedural glyph drawn when no vector icon is available.
    #[cfg(feature = "compositor")]
    pub fn glyph_shape(&self, label: &str) -> GlyphShape {
        match self {
            Self::PagePrev | Self::MoveLeft => GlyphShape::ArrowLeft,
            Self::PageNext | Self::MoveRight => GlyphShape::ArrowRight,
            Self::ModeBack => GlyphShape::Back,
            Self::Refresh => GlyphShape::Refresh,
            _ => GlyphShape::Label(self.display_label(label)),
        }
    }
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "home" => Self::Home,
            "page_prev" => Self::PagePrev,
            "page_next" => Self::PageNext,
            "move_left" => Self::MoveLeft,
            "move_right" => Self::MoveRight,
            "mode_back" => Self::ModeBack,
            "refresh" => Self::Refresh,
            "idle" => Self::Idle,
            "selected_preview" => Self::SelectedPreview,
            other => Self::Other(other.to_owned()),
        })
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(role) => role,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
