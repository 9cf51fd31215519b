//! keycap-renderer: 72x72 key images for a hardware keypad controller.
//!
//! A key is rendered in one of two modes:
//!
//! - **app**: the icon of an application bundle, converted to PNG by the
//!   OS conversion utility, resized to the key canvas, and optionally
//!   decorated with a selection ring and a badge.
//! - **control**: a symbolic role drawn on black, using a vector icon from
//!   the default icon pack when one converts cleanly, else a procedural
//!   glyph or text label.
//!
//! The finished image always replaces the output file atomically.
//!
//! # Example
//!
//! ```no_run
//! use keycap_renderer::{
//!     Backend, DefaultsReader, RenderRequest, Renderer, RendererConfig, Role, SipsRasterizer,
//! };
//!
//! let config = RendererConfig::default();
//! let backend = Backend::probe(&config);
//! let renderer = Renderer::new(config, DefaultsReader, SipsRasterizer, backend);
//!
//! let status = renderer.run(&RenderRequest::Control {
//!     role: Role::PagePrev,
//!     label: String::new(),
//!     output: "prev.png".into(),
//! });
//! assert_eq!(status.code(), 0);
//! ```

mod config;
mod dispatch;
mod error;
mod icon;
mod rasterizer;
mod role;
mod source;
mod writer;

#[cfg(feature = "compositor")]
mod compositor;
#[cfg(feature = "compositor")]
pub mod layer;

#[cfg(feature = "compositor")]
pub use compositor::Compositor;
pub use config::{RendererConfig, CONFIG_ENV};
pub use dispatch::{Backend, ExitStatus, RenderRequest, Renderer, CONTROL_ICON_SIZE};
pub use error::{RenderError, Result};
pub use icon::{Canvas, RectPx, KEY_SIZE};
pub use rasterizer::{Rasterize, SipsRasterizer};
pub use role::Role;
pub use source::{DefaultsReader, PropertyReader, SourceResolver};
pub use writer::{copy_file_atomic, write_png_atomic};
