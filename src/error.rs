//! Errors for theme loading

use std::io;
use std::path::PathBuf;

use crate::theme::ParseError;

/// A theme file could not be loaded; the caller moves on to the next source
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("theme file {} not found or unreadable", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: Option<io::Error>,
    },
    #[error("failed to parse theme {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl LoadError {
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::NotFound { path, .. } | LoadError::Parse { path, .. } => path,
        }
    }
}
