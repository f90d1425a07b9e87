//! Auxiliary files owned by an item.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// An auxiliary content file (image, attachment, ...) belonging to an item.
///
/// The item model does not inspect files; it only carries them for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct File {
    path: PathBuf,
}

impl File {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Basename of the file, or an empty string for paths without one.
    #[must_use]
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
