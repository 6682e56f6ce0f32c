//! Typed theme model
//!
//! One `Configuration` describes a complete theme: identity, presentation
//! mode, numeric style, font, blur and the color palette. Every field always
//! holds a value; partial documents are resolved against the defaults before
//! they ever reach this type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::color::Color;

/// Error for enumeration ordinals that have no matching variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} ordinal {value}")]
pub struct UnknownOrdinal {
    pub kind: &'static str,
    pub value: u8,
}

/// Generates the stable ordinal conversions shared by the mode enumerations.
macro_rules! ordinal_enum {
    ($ty:ident, $kind:literal, { $($variant:ident = $ord:literal => $label:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($ty::$variant => $label),+
                }
            }
        }

        impl From<$ty> for u8 {
            fn from(value: $ty) -> Self {
                value as u8
            }
        }

        impl TryFrom<u8> for $ty {
            type Error = UnknownOrdinal;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $($ord => Ok($ty::$variant),)+
                    _ => Err(UnknownOrdinal { kind: $kind, value }),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

/// Rendering technology that draws the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RendererKind {
    /// Immediate-mode GUI drawn every frame
    Immediate = 0,
    /// Host toolkit widgets
    Native = 1,
}

ordinal_enum!(RendererKind, "renderer", {
    Immediate = 0 => "Immediate",
    Native = 1 => "Native",
});

/// Macro arrangement of the overlay panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LayoutMode {
    Tabbed = 0,
    Panel = 1,
}

ordinal_enum!(LayoutMode, "layout", {
    Tabbed = 0 => "Tabbed",
    Panel = 1 => "Panel",
});

/// Built-in widget style packs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ComponentTheme {
    Standard = 0,
    Overlay = 1,
    Classic = 2,
    Compact = 3,
}

ordinal_enum!(ComponentTheme, "style", {
    Standard = 0 => "Standard",
    Overlay = 1 => "Overlay",
    Classic = 2 => "Classic",
    Compact = 3 => "Compact",
});

/// Named color slots
///
/// Key names match the persisted `colors` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub frame_background: Color,
    pub disabled: Color,
    pub border: Color,
    pub title_background: Color,
    pub title_foreground: Color,
    pub checkbox_background: Color,
    pub checkbox_checkmark: Color,
    pub checkbox_foreground: Color,
    pub button_background: Color,
    pub button_foreground: Color,
    pub button_disabled: Color,
    pub button_disabled_foreground: Color,
    pub button_hovered: Color,
    pub button_hovered_foreground: Color,
    pub button_activated: Color,
    pub button_active_foreground: Color,
}

/// Number of color slots in a palette
pub const PALETTE_SLOTS: usize = 18;

impl Palette {
    /// Persisted key and value of every slot, in file order
    pub fn slots(&self) -> [(&'static str, Color); PALETTE_SLOTS] {
        [
            ("backgroundColor", self.background),
            ("frameBackground", self.frame_background),
            ("foregroundColor", self.foreground),
            ("disabledColor", self.disabled),
            ("borderColor", self.border),
            ("titleBackgroundColor", self.title_background),
            ("titleForegroundColor", self.title_foreground),
            ("checkboxBackgroundColor", self.checkbox_background),
            ("checkboxCheckmarkColor", self.checkbox_checkmark),
            ("checkboxForegroundColor", self.checkbox_foreground),
            ("buttonBackgroundColor", self.button_background),
            ("buttonForegroundColor", self.button_foreground),
            ("buttonDisabledColor", self.button_disabled),
            ("buttonDisabledForeground", self.button_disabled_foreground),
            ("buttonHoveredColor", self.button_hovered),
            ("buttonHoveredForeground", self.button_hovered_foreground),
            ("buttonActivatedColor", self.button_activated),
            ("buttonActiveForeground", self.button_active_foreground),
        ]
    }

    /// Mutable access to every slot by persisted key
    pub fn slots_mut(&mut self) -> [(&'static str, &mut Color); PALETTE_SLOTS] {
        [
            ("backgroundColor", &mut self.background),
            ("frameBackground", &mut self.frame_background),
            ("foregroundColor", &mut self.foreground),
            ("disabledColor", &mut self.disabled),
            ("borderColor", &mut self.border),
            ("titleBackgroundColor", &mut self.title_background),
            ("titleForegroundColor", &mut self.title_foreground),
            ("checkboxBackgroundColor", &mut self.checkbox_background),
            ("checkboxCheckmarkColor", &mut self.checkbox_checkmark),
            ("checkboxForegroundColor", &mut self.checkbox_foreground),
            ("buttonBackgroundColor", &mut self.button_background),
            ("buttonForegroundColor", &mut self.button_foreground),
            ("buttonDisabledColor", &mut self.button_disabled),
            ("buttonDisabledForeground", &mut self.button_disabled_foreground),
            ("buttonHoveredColor", &mut self.button_hovered),
            ("buttonHoveredForeground", &mut self.button_hovered_foreground),
            ("buttonActivatedColor", &mut self.button_activated),
            ("buttonActiveForeground", &mut self.button_active_foreground),
        ]
    }
}

/// Complete visual customization of the overlay
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    // Identity
    pub name: String,
    pub description: String,
    pub author: String,

    // Presentation mode
    pub renderer: RendererKind,
    pub layout: LayoutMode,
    pub style: ComponentTheme,

    // Numeric style
    pub ui_scale: f32,
    pub border_size: f32,
    pub window_rounding: f32,
    pub frame_rounding: f32,
    pub window_margin: f32,
    pub frame_padding: f32,
    pub font_size: f32,

    /// Font name, resolved against the runtime font list when applied
    pub font: String,

    // Blur
    pub blur_enabled: bool,
    pub blur_speed: f32,
    pub blur_radius: f32,

    pub colors: Palette,
}

/// Discovery record for a theme package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeMeta {
    pub name: String,
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_are_stable() {
        assert_eq!(u8::from(RendererKind::Immediate), 0);
        assert_eq!(u8::from(RendererKind::Native), 1);
        assert_eq!(u8::from(LayoutMode::Panel), 1);
        assert_eq!(u8::from(ComponentTheme::Compact), 3);
        assert_eq!(ComponentTheme::try_from(2), Ok(ComponentTheme::Classic));
    }

    #[test]
    fn test_unknown_ordinal_is_rejected() {
        let err = LayoutMode::try_from(7).unwrap_err();
        assert_eq!(err, UnknownOrdinal { kind: "layout", value: 7 });
        assert!(serde_json::from_value::<RendererKind>(serde_json::json!(9)).is_err());
        assert!(serde_json::from_value::<RendererKind>(serde_json::json!(-1)).is_err());
    }

    #[test]
    fn test_slot_keys_are_unique() {
        let palette = crate::theme::resolve_defaults(crate::theme::Platform::Desktop).colors;
        let mut keys: Vec<_> = palette.slots().iter().map(|(key, _)| *key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), PALETTE_SLOTS);
    }

    #[test]
    fn test_slots_mut_writes_through() {
        let mut palette = crate::theme::resolve_defaults(crate::theme::Platform::Desktop).colors;
        for (key, color) in palette.slots_mut() {
            if key == "borderColor" {
                *color = Color::rgb(1, 2, 3);
            }
        }
        assert_eq!(palette.border, Color::rgb(1, 2, 3));
    }
}
