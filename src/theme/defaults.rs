//! Baseline theme values
//!
//! The resolver is a pure function of the platform capability. It runs before
//! every load so that fields absent from a document keep these values.

use super::schema::{ComponentTheme, Configuration, LayoutMode, Palette, RendererKind};
use crate::color::Color;
use crate::constants::font;

/// Platform capability that selects the presentation defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Desktop with keyboard and mouse
    Desktop,
    /// Touch/mobile environment with restricted windowing
    Restricted,
}

impl Platform {
    /// Probe the build target once at startup
    pub fn detect() -> Self {
        if cfg!(any(target_os = "android", target_os = "ios")) {
            Platform::Restricted
        } else {
            Platform::Desktop
        }
    }
}

/// Default dark palette shared by every platform
fn default_palette() -> Palette {
    Palette {
        background: Color::from_argb32(0xF0_14_14_1A),
        foreground: Color::from_argb32(0xFF_E6_E6_EB),
        frame_background: Color::from_argb32(0xFF_23_23_2D),
        disabled: Color::from_argb32(0xFF_6E_6E_78),
        border: Color::from_argb32(0xFF_3C_3C_4B),
        title_background: Color::from_argb32(0xFF_7A_3C_D2),
        title_foreground: Color::from_argb32(0xFF_FF_FF_FF),
        checkbox_background: Color::from_argb32(0xFF_2D_2D_3A),
        checkbox_checkmark: Color::from_argb32(0xFF_A0_78_F0),
        checkbox_foreground: Color::from_argb32(0xFF_E6_E6_EB),
        button_background: Color::from_argb32(0xFF_2D_2D_3A),
        button_foreground: Color::from_argb32(0xFF_E6_E6_EB),
        button_disabled: Color::from_argb32(0xFF_1E_1E_26),
        button_disabled_foreground: Color::from_argb32(0xFF_6E_6E_78),
        button_hovered: Color::from_argb32(0xFF_44_44_58),
        button_hovered_foreground: Color::from_argb32(0xFF_FF_FF_FF),
        button_activated: Color::from_argb32(0xFF_7A_3C_D2),
        button_active_foreground: Color::from_argb32(0xFF_FF_FF_FF),
    }
}

/// Complete baseline configuration for `platform`
pub fn resolve_defaults(platform: Platform) -> Configuration {
    let (renderer, layout, font_size) = match platform {
        Platform::Desktop => (RendererKind::Immediate, LayoutMode::Tabbed, font::DESKTOP_SIZE),
        Platform::Restricted => (RendererKind::Native, LayoutMode::Panel, font::RESTRICTED_SIZE),
    };

    Configuration {
        name: String::new(),
        description: String::new(),
        author: String::new(),
        renderer,
        layout,
        style: ComponentTheme::Overlay,
        ui_scale: 1.0,
        border_size: 1.0,
        window_rounding: 0.0,
        frame_rounding: 4.0,
        window_margin: 4.0,
        frame_padding: 4.0,
        font_size,
        font: font::DEFAULT_NAME.to_string(),
        blur_enabled: true,
        blur_speed: 0.3,
        blur_radius: 1.0,
        colors: default_palette(),
    }
}
