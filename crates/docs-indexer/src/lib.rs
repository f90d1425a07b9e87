//! Item tree building for the docs engine.
//!
//! Walks a documentation repository on disk and assembles the
//! [`Item`](docs_item::Item) tree bottom-up: every directory holding a
//! markdown marker file becomes an item, its `files/` sub-directory supplies
//! the auxiliary files, and its other sub-directories supply child items.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use docs_config::IndexerConfig;
//! use docs_indexer::Indexer;
//!
//! let index = Indexer::new(IndexerConfig::default()).index(Path::new("docs"))?;
//! for item in index.unrendered() {
//!     println!("{} needs rendering", index.relative_path(item));
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod index;
mod scanner;

pub use error::IndexError;
pub use index::Index;
pub use scanner::{Indexer, index_repository};
