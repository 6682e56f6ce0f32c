//! Theme package discovery
//!
//! Scans the bundled resources directory and the user packages directory for
//! `*.json` themes. Only `details.name` is extracted from each candidate, so a
//! scan never materializes a full configuration.

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::schema::ThemeMeta;
use crate::constants::paths::THEME_EXTENSION;
use crate::paths::HostPaths;

/// Read just enough of `path` to list it in a theme picker
///
/// Returns `None` when the file is missing, unreadable, not JSON, or has no
/// string `details.name`.
pub fn check_candidate(path: &Path) -> Option<ThemeMeta> {
    let contents = fs::read(path).ok()?;
    let document: Value = match serde_json::from_slice(&contents) {
        Ok(document) => document,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Skipping malformed theme candidate");
            return None;
        }
    };

    let Some(name) = document.pointer("/details/name").and_then(Value::as_str) else {
        debug!(path = %path.display(), "Skipping theme candidate without details.name");
        return None;
    };

    Some(ThemeMeta {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Collect candidates from one directory, non-recursively, in enumeration order
fn scan_dir(dir: &Path, found: &mut Vec<ThemeMeta>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "Theme directory not readable");
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != THEME_EXTENSION) || !path.is_file() {
            continue;
        }
        if let Some(meta) = check_candidate(&path) {
            found.push(meta);
        }
    }
}

/// All theme packages from the bundled and user directories
///
/// Bundled themes come first. Names are not deduplicated and the order within
/// a directory is whatever the filesystem returns. The user packages directory
/// is created when missing.
pub fn list_available(paths: &HostPaths) -> Vec<ThemeMeta> {
    if let Err(e) = fs::create_dir_all(&paths.packages_dir) {
        warn!(dir = %paths.packages_dir.display(), error = %e, "Failed to create theme packages directory");
    }

    let mut found = Vec::new();
    scan_dir(&paths.resources_dir, &mut found);
    scan_dir(&paths.packages_dir, &mut found);
    debug!(count = found.len(), "Discovered theme packages");
    found
}

/// Tie-break used when no saved theme exists and several packages were found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CandidateOrder {
    /// Lowest name wins; equal names keep discovery order
    #[default]
    ByName,
    /// First discovered wins
    Enumeration,
}

impl CandidateOrder {
    pub fn pick(self, candidates: &[ThemeMeta]) -> Option<&ThemeMeta> {
        match self {
            // min_by returns the first of equal minimums
            CandidateOrder::ByName => candidates.iter().min_by(|a, b| a.name.cmp(&b.name)),
            CandidateOrder::Enumeration => candidates.first(),
        }
    }
}
