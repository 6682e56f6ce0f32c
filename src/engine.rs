//! Contracts for the rendering engine and font subsystem
//!
//! The theme manager never owns either collaborator. It checks
//! [`RenderEngine::is_active`] before every push and otherwise only stores
//! the value, so changes made before the engine starts are picked up when the
//! engine reads the configuration.

use crate::theme::{ComponentTheme, LayoutMode, RendererKind};

/// Live renderer that accepts theme changes without a reload
///
/// Methods take `&self`; implementations use interior mutability since the
/// engine is shared with the render loop on the same thread.
pub trait RenderEngine {
    fn is_active(&self) -> bool;
    fn set_renderer(&self, renderer: RendererKind);
    fn set_layout_mode(&self, layout: LayoutMode);
    fn set_component_theme(&self, theme: ComponentTheme);
    /// Switch the font manager to `name`
    fn set_font(&self, name: &str);
    /// Engines without a live font-size path ignore this
    fn set_font_size(&self, _size: f32) {}
}

/// Engine placeholder for hosts that have no renderer running
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedEngine;

impl RenderEngine for DetachedEngine {
    fn is_active(&self) -> bool {
        false
    }

    fn set_renderer(&self, _renderer: RendererKind) {}

    fn set_layout_mode(&self, _layout: LayoutMode) {}

    fn set_component_theme(&self, _theme: ComponentTheme) {}

    fn set_font(&self, _name: &str) {}
}

/// A font the engine can load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontInfo {
    pub name: String,
}

/// Runtime font enumeration
pub trait FontProvider {
    fn fetch_available_fonts(&self) -> Vec<FontInfo>;
}

/// Fixed font list, for hosts that bundle their own fonts
#[derive(Debug, Clone, Default)]
pub struct StaticFonts(pub Vec<String>);

impl FontProvider for StaticFonts {
    fn fetch_available_fonts(&self) -> Vec<FontInfo> {
        self.0
            .iter()
            .map(|name| FontInfo { name: name.clone() })
            .collect()
    }
}
