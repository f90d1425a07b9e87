//! Repository items and the item tree.
//!
//! An [`Item`] is created once from its marker file path plus already-built
//! files and children. Classification and the rendered output path are
//! derived at construction and never change afterwards; only blocks can be
//! appended later.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use sha1::{Digest, Sha1};

use crate::{Block, File, ItemType};

/// Filename of the rendered output written next to each item's marker file.
pub const RENDERED_FILENAME: &str = "index.html";

/// Number of digest bytes kept for [`Item::content_hash`].
const HASH_PREFIX_LEN: usize = 6;

/// Error returned by [`Item::new`] when the marker filename is not recognized.
///
/// Classification failures are not fatal: the error owns the fully populated
/// item (with type [`ItemType::Unknown`]) so the caller can decide whether to
/// keep it.
#[derive(Debug, thiserror::Error)]
#[error(
    "The item \"{}\" does not match any of the known item types.",
    .item.path.display()
)]
pub struct UnknownItemType {
    item: Box<Item>,
}

impl UnknownItemType {
    /// Path of the item that failed classification.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.item.path
    }

    /// Borrow the unclassified item.
    #[must_use]
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Take back the unclassified item.
    #[must_use]
    pub fn into_item(self) -> Item {
        *self.item
    }
}

/// A node in the documentation tree.
///
/// Each item exclusively owns its files, blocks and child items. The tree has
/// no back-references; traversal is strictly top-down via [`Item::walk`] or
/// [`Item::iter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    path: PathBuf,
    rendered_path: PathBuf,
    #[serde(rename = "type")]
    item_type: ItemType,
    files: Vec<File>,
    blocks: Vec<Block>,
    child_items: Vec<Item>,
}

impl Item {
    /// Create an item from its marker file path, auxiliary files and children.
    ///
    /// The item type is derived from the basename of `path` and the rendered
    /// path is `<dir of path>/index.html`. No filesystem access happens here.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownItemType`] if the basename is not a marker filename.
    /// The error still carries the constructed item.
    pub fn new(
        path: impl Into<PathBuf>,
        files: Vec<File>,
        child_items: Vec<Item>,
    ) -> Result<Self, UnknownItemType> {
        let path = path.into();
        let item_type = classify(&path);
        let item = Self {
            rendered_path: rendered_path_for(&path),
            path,
            item_type,
            files,
            blocks: Vec::new(),
            child_items,
        };

        if item_type.is_known() {
            Ok(item)
        } else {
            Err(UnknownItemType {
                item: Box::new(item),
            })
        }
    }

    /// Path of the item's marker source file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path where the rendered output is (or will be) written.
    #[must_use]
    pub fn rendered_path(&self) -> &Path {
        &self.rendered_path
    }

    #[must_use]
    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    #[must_use]
    pub fn files(&self) -> &[File] {
        &self.files
    }

    #[must_use]
    pub fn child_items(&self) -> &[Item] {
        &self.child_items
    }

    /// Blocks in insertion order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Basename of the marker source file.
    #[must_use]
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Canonical output location of the item (its rendered path).
    #[must_use]
    pub fn absolute_path(&self) -> &Path {
        &self.rendered_path
    }

    /// Rendered path relative to `base_path`, always starting with a single `/`.
    ///
    /// The first occurrence of `base_path` is removed from the rendered path
    /// as a plain substring; it is not checked to be a prefix. Callers must
    /// pass an ancestor directory of the item, otherwise the result is
    /// meaningless.
    #[must_use]
    pub fn relative_path(&self, base_path: impl AsRef<Path>) -> String {
        let rendered = self.rendered_path.to_string_lossy();
        let base = base_path.as_ref().to_string_lossy();
        let relative = rendered.replacen(base.as_ref(), "", 1);
        format!("/{}", relative.trim_start_matches('/'))
    }

    /// Short content fingerprint of the marker file.
    ///
    /// Returns the first 6 bytes of the SHA-1 digest as 12 lowercase hex
    /// characters, or an empty string if the file cannot be read. Used for
    /// change detection only; collisions are possible.
    #[must_use]
    pub fn content_hash(&self) -> String {
        match fs::read(&self.path) {
            Ok(bytes) => {
                let digest = Sha1::digest(&bytes);
                hex::encode(&digest[..HASH_PREFIX_LEN])
            }
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "Cannot hash item");
                String::new()
            }
        }
    }

    /// Check whether anything exists at the rendered path.
    ///
    /// Does not compare timestamps or content; stale output counts as rendered.
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        self.rendered_path.exists()
    }

    /// Value of the first block called `name` (case-insensitive).
    ///
    /// Returns an empty string when no block matches.
    #[must_use]
    pub fn block_value(&self, name: &str) -> &str {
        self.blocks
            .iter()
            .find(|block| block.matches(name))
            .map_or("", Block::value)
    }

    /// Append a block. Duplicate names are allowed; lookups return the first.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty. An unnamed block is a caller bug.
    pub fn add_block(&mut self, name: impl Into<String>, value: impl Into<String>) {
        match Block::new(name, value) {
            Ok(block) => self.blocks.push(block),
            Err(e) => panic!("Cannot add a block without a name: {e}"),
        }
    }

    /// Visit this item and all descendants depth-first, parents before children.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&Item),
    {
        self.walk_inner(&mut visit);
    }

    fn walk_inner<F>(&self, visit: &mut F)
    where
        F: FnMut(&Item),
    {
        visit(self);
        for child in &self.child_items {
            child.walk_inner(visit);
        }
    }

    /// Pre-order iterator over this item and its descendants.
    ///
    /// Yields items in the same order [`Item::walk`] visits them.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }
}

impl<'a> IntoIterator for &'a Item {
    type Item = &'a Item;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator returned by [`Item::iter`].
pub struct Iter<'a> {
    stack: Vec<&'a Item>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.stack.pop()?;
        self.stack.extend(item.child_items.iter().rev());
        Some(item)
    }
}

fn classify(path: &Path) -> ItemType {
    path.file_name()
        .map_or(ItemType::Unknown, |name| {
            ItemType::from_filename(&name.to_string_lossy())
        })
}

fn rendered_path_for(path: &Path) -> PathBuf {
    clean(path.parent().unwrap_or(path)).join(RENDERED_FILENAME)
}

/// Lexically normalize `path`: collapse separators, drop `.` and resolve `..`
/// against preceding names. `..` directly below the root is dropped.
fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    let mut names = 0usize;
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => cleaned.push(component),
            Component::CurDir => {}
            Component::ParentDir if names > 0 => {
                cleaned.pop();
                names -= 1;
            }
            Component::ParentDir => {
                if !cleaned.has_root() {
                    cleaned.push("..");
                }
            }
            Component::Normal(name) => {
                cleaned.push(name);
                names += 1;
            }
        }
    }
    cleaned
}
