//! System font enumeration via fontconfig

use anyhow::{Context, Result};
use fontconfig::{Fontconfig, Pattern};
use std::collections::BTreeSet;
use tracing::{info, warn};

use crate::engine::{FontInfo, FontProvider};

/// Get list of all individual fonts with their full names (e.g., "Roboto Mono", "DejaVu Sans Bold")
///
/// "Regular" is implied and dropped from the name. Results are sorted and
/// deduplicated.
pub fn list_fonts() -> Result<Vec<String>> {
    let fc = Fontconfig::new().context("Failed to initialize fontconfig")?;

    // Empty pattern matches all fonts
    let pattern = Pattern::new(&fc);
    let font_set = fontconfig::list_fonts(&pattern, None);

    let mut fonts = BTreeSet::new();
    for font_pattern in font_set.iter() {
        let family = font_pattern
            .get_string(fontconfig::FC_FAMILY)
            .unwrap_or("Unknown");

        let font_name = match font_pattern.get_string(fontconfig::FC_STYLE) {
            Some(style) if style != "Regular" => format!("{} {}", family, style),
            _ => family.to_string(),
        };
        fonts.insert(font_name);
    }

    info!(count = fonts.len(), "Discovered fonts via fontconfig");
    Ok(fonts.into_iter().collect())
}

/// [`FontProvider`] backed by the system fontconfig database
#[derive(Debug, Default, Clone, Copy)]
pub struct FontconfigProvider;

impl FontProvider for FontconfigProvider {
    fn fetch_available_fonts(&self) -> Vec<FontInfo> {
        match list_fonts() {
            Ok(names) => names.into_iter().map(|name| FontInfo { name }).collect(),
            Err(e) => {
                warn!(error = ?e, "Failed to load font list from fontconfig");
                Vec::new()
            }
        }
    }
}
