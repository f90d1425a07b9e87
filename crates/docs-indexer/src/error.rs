//! Tree building errors.

use std::path::PathBuf;

use docs_item::UnknownItemType;

/// Error building an item tree.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Repository root does not exist.
    #[error("Repository not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Repository root is not a directory.
    #[error("Repository root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    /// Repository root directory holds no item of its own.
    #[error("No item found at repository root: {}", .0.display())]
    NoRootItem(PathBuf),
    /// Directory could not be read.
    #[error("Cannot read directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Unclassified item under [`UnknownItemPolicy::Abort`](docs_config::UnknownItemPolicy::Abort).
    #[error(transparent)]
    UnknownItem(#[from] UnknownItemType),
}

impl IndexError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
