//! Host directories the theme manager reads and writes

use std::env;
use std::path::PathBuf;

use crate::constants::paths::{
    APP_DIR, PACKAGES_DIR, RESOURCES_DIR, RESOURCES_ENV, SAVED_THEME_FILENAME,
};

/// Directories provided by the host environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPaths {
    /// Holds the user's saved `theme.json`
    pub save_dir: PathBuf,
    /// Themes shipped with the application (read-only)
    pub resources_dir: PathBuf,
    /// User-installed theme packages, created on demand
    pub packages_dir: PathBuf,
}

impl HostPaths {
    /// Resolve the platform directories
    ///
    /// Falls back to the working directory when the platform has no
    /// data/config dir. `OVERLAY_THEME_RESOURCES` overrides the bundled path.
    pub fn detect() -> Self {
        let mut save_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        save_dir.push(APP_DIR);

        let mut packages_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        packages_dir.push(APP_DIR);
        packages_dir.push(PACKAGES_DIR);

        let resources_dir = env::var_os(RESOURCES_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(RESOURCES_DIR));

        Self {
            save_dir,
            resources_dir,
            packages_dir,
        }
    }

    /// Location of the user's saved theme
    pub fn saved_theme(&self) -> PathBuf {
        self.save_dir.join(SAVED_THEME_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_theme_path() {
        let paths = HostPaths {
            save_dir: PathBuf::from("/data/overlay-theme"),
            resources_dir: PathBuf::from("/opt/resources"),
            packages_dir: PathBuf::from("/config/overlay-theme/themes"),
        };
        assert_eq!(paths.saved_theme(), PathBuf::from("/data/overlay-theme/theme.json"));
    }

    #[test]
    fn test_detect_uses_app_dir() {
        let paths = HostPaths::detect();
        assert!(paths.save_dir.ends_with(APP_DIR));
        assert!(paths.packages_dir.ends_with(PathBuf::from(APP_DIR).join(PACKAGES_DIR)));
    }
}
