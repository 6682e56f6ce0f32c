//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the crate, providing a single source of truth for constant values.

/// Host directory and file naming
pub mod paths {
    /// Directory name used under the platform data/config dirs
    pub const APP_DIR: &str = "overlay-theme";

    /// File holding the user's saved theme inside the save directory
    pub const SAVED_THEME_FILENAME: &str = "theme.json";

    /// Subdirectory of the config dir holding user-installed theme packages
    pub const PACKAGES_DIR: &str = "themes";

    /// Bundled resources directory (relative to the working directory)
    pub const RESOURCES_DIR: &str = "resources";

    /// Environment variable overriding the bundled resources directory
    pub const RESOURCES_ENV: &str = "OVERLAY_THEME_RESOURCES";

    /// Extension of theme package files (without the dot)
    pub const THEME_EXTENSION: &str = "json";
}

/// Persisted document layout
pub mod document {
    /// Identity and presentation mode group
    pub const DETAILS: &str = "details";

    /// Blur settings group
    pub const BLUR: &str = "blur";

    /// Numeric style and font group
    pub const OTHER: &str = "other";

    /// Color palette group
    pub const COLORS: &str = "colors";

    /// Indentation used when writing theme files
    pub const INDENT: &[u8] = b"    ";
}

/// Scaling
pub mod scale {
    /// Session store key for the per-session scale override
    pub const SESSION_KEY: &str = "ui.scale";

    /// Fixed platform scale applied on top of the stored and session scales
    pub const DEFAULT_SCALE: f32 = 1.0;
}

/// Default font selection
pub mod font {
    /// Font requested when a theme does not name one
    pub const DEFAULT_NAME: &str = "DejaVu Sans";

    /// Default font size on desktop targets
    pub const DESKTOP_SIZE: f32 = 20.0;

    /// Default font size on touch/mobile targets
    pub const RESTRICTED_SIZE: f32 = 24.0;
}
