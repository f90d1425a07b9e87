//! Built item tree with repository-wide queries.

use std::path::{Path, PathBuf};

use docs_item::{Item, ItemType};

/// Root item of an indexed repository together with the repository root path.
#[derive(Debug)]
pub struct Index {
    root: Item,
    base_path: PathBuf,
}

impl Index {
    pub(crate) fn new(root: Item, base_path: PathBuf) -> Self {
        Self { root, base_path }
    }

    #[must_use]
    pub fn root(&self) -> &Item {
        &self.root
    }

    #[must_use]
    pub fn into_root(self) -> Item {
        self.root
    }

    /// Repository root directory the index was built from.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Number of items in the tree, root included.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.root.iter().count()
    }

    /// Link path of `item` relative to the repository root (e.g. `/guide/index.html`).
    #[must_use]
    pub fn relative_path(&self, item: &Item) -> String {
        item.relative_path(&self.base_path)
    }

    /// All items of the given type, in traversal order.
    #[must_use]
    pub fn find_by_type(&self, item_type: ItemType) -> Vec<&Item> {
        self.root
            .iter()
            .filter(|item| item.item_type() == item_type)
            .collect()
    }

    /// Items whose rendered output does not exist yet, in traversal order.
    #[must_use]
    pub fn unrendered(&self) -> Vec<&Item> {
        self.root.iter().filter(|item| !item.is_rendered()).collect()
    }
}
