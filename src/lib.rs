//! Theme persistence and live configuration for the overlay
//!
//! The crate keeps one complete `Configuration` (colors, layout, fonts, blur,
//! renderer choice), restores it from JSON theme files, discovers theme
//! packages, and pushes individual changes into a running render engine.

#![forbid(unsafe_code)]

pub mod color;
pub mod constants;
pub mod engine;
pub mod error;
pub mod font_discovery;
pub mod manager;
pub mod paths;
pub mod session;
pub mod theme;

// Re-export commonly used types
pub use color::Color;
pub use engine::{DetachedEngine, FontInfo, FontProvider, RenderEngine, StaticFonts};
pub use error::LoadError;
pub use font_discovery::FontconfigProvider;
pub use manager::{ThemeManager, ThemeSource};
pub use paths::HostPaths;
pub use session::SessionStore;
pub use theme::{
    CandidateOrder, ComponentTheme, Configuration, DocumentShape, LayoutMode, ParseReport,
    Platform, RendererKind, ThemeMeta,
};
