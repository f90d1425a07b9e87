//! Item tree data model for the docs engine.
//!
//! A documentation repository is a tree of directories. Each directory that
//! holds a marker file (e.g. `document.md`, `presentation.md`) is an [`Item`].
//! This crate provides:
//!
//! - [`Item`]: a tree node with its classification, rendered output path,
//!   auxiliary files, named blocks and child items
//! - [`ItemType`]: the fixed taxonomy of item kinds, derived from the marker
//!   filename
//! - [`Block`]: a named text fragment consumed by templates
//! - [`File`]: an opaque auxiliary file owned by an item
//!
//! Trees are assembled bottom-up by an external builder (see `docs-indexer`):
//! children are fully constructed before they are handed to their parent.
//!
//! # Example
//!
//! ```
//! use docs_item::{Item, ItemType};
//!
//! let leaf = Item::new("a/document.md", Vec::new(), Vec::new()).unwrap();
//! assert_eq!(leaf.item_type(), ItemType::Document);
//!
//! let mut root = Item::new("root/collection.md", Vec::new(), vec![leaf]).unwrap();
//! root.add_block("Title", "Home");
//! assert_eq!(root.block_value("title"), "Home");
//!
//! let mut visited = Vec::new();
//! root.walk(|item| visited.push(item.item_type()));
//! assert_eq!(visited, [ItemType::Collection, ItemType::Document]);
//! ```

mod block;
mod file;
mod item;
mod item_type;

pub use block::{Block, BlockError};
pub use file::File;
pub use item::{Item, Iter, UnknownItemType, RENDERED_FILENAME};
pub use item_type::ItemType;
