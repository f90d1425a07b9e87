//! Repository discovery by filesystem walking.
//!
//! Directories are scanned depth-first and items are created on the way back
//! up, so every child item is complete before its parent is constructed.

use std::fs;
use std::path::{Path, PathBuf};

use docs_config::{Config, IndexerConfig, UnknownItemPolicy};
use docs_item::{File, Item, ItemType, UnknownItemType};

use crate::{Index, IndexError};

/// Builds an item tree from a repository directory.
///
/// A directory is an item directory when it contains at least one `.md`
/// file. The item's defining file is the first marker file (by name); if
/// there is none, the first `.md` file is used and the item is unknown.
/// Directories without markdown are transparent: their child items are
/// attached to the nearest item ancestor.
pub struct Indexer {
    config: IndexerConfig,
}

impl Indexer {
    #[must_use]
    pub fn new(config: IndexerConfig) -> Self {
        Self { config }
    }

    /// Index the repository rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::NotFound` / `IndexError::NotADirectory` for an
    /// invalid root, `IndexError::NoRootItem` if `root` itself holds no item,
    /// `IndexError::Io` if a directory cannot be read, and
    /// `IndexError::UnknownItem` for unclassified items under the abort policy.
    pub fn index(&self, root: &Path) -> Result<Index, IndexError> {
        if !root.exists() {
            return Err(IndexError::NotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(IndexError::NotADirectory(root.to_path_buf()));
        }

        let mut items = self.scan_directory(root)?;
        let root_item = match (items.pop(), items.is_empty()) {
            (Some(item), true) if item.path().parent() == Some(root) => item,
            _ => return Err(IndexError::NoRootItem(root.to_path_buf())),
        };

        let index = Index::new(root_item, root.to_path_buf());
        let unknown = index.find_by_type(ItemType::Unknown).len();
        tracing::info!(
            root = %root.display(),
            items = index.item_count(),
            unknown,
            "Indexed repository"
        );
        Ok(index)
    }

    /// Scan `dir` and return the items it contributes to its parent.
    ///
    /// An item directory yields at most one item (itself, with its subtree).
    /// Any other directory yields the items found below it.
    fn scan_directory(&self, dir: &Path) -> Result<Vec<Item>, IndexError> {
        let entries = read_sorted(dir)?;

        let mut markdown = Vec::new();
        let mut subdirs = Vec::new();
        for entry in entries {
            if entry.is_dir {
                subdirs.push(entry);
            } else if is_markdown(&entry.path) {
                markdown.push(entry.path);
            }
        }

        let is_item_dir = !markdown.is_empty();
        let mut children = Vec::new();
        for subdir in subdirs {
            if is_item_dir && subdir.name == self.config.files_dir {
                continue;
            }
            children.extend(self.scan_directory(&subdir.path)?);
        }

        if !is_item_dir {
            tracing::debug!(dir = %dir.display(), "no markdown, passing children up");
            return Ok(children);
        }

        let defining = markdown
            .iter()
            .find(|path| {
                path.file_name()
                    .is_some_and(|name| ItemType::from_filename(&name.to_string_lossy()).is_known())
            })
            .unwrap_or(&markdown[0])
            .clone();

        let files_dir = dir.join(&self.config.files_dir);
        let files = if files_dir.is_dir() {
            collect_files(&files_dir)?
        } else {
            Vec::new()
        };

        tracing::debug!(
            path = %defining.display(),
            files = files.len(),
            children = children.len(),
            "building item"
        );

        match Item::new(defining, files, children) {
            Ok(item) => Ok(vec![item]),
            Err(err) => self.handle_unknown(err),
        }
    }

    fn handle_unknown(&self, err: UnknownItemType) -> Result<Vec<Item>, IndexError> {
        match self.config.unknown_items {
            UnknownItemPolicy::Warn => {
                tracing::warn!(path = %err.path().display(), "Keeping item of unknown type");
                Ok(vec![err.into_item()])
            }
            UnknownItemPolicy::Skip => {
                tracing::warn!(path = %err.path().display(), "Skipping item of unknown type");
                Ok(Vec::new())
            }
            UnknownItemPolicy::Abort => Err(err.into()),
        }
    }
}

/// Index the repository described by a loaded configuration.
///
/// # Errors
///
/// See [`Indexer::index`].
pub fn index_repository(config: &Config) -> Result<Index, IndexError> {
    Indexer::new(config.indexer.clone()).index(&config.repository_resolved.path)
}

/// Directory entry with cached file type.
struct Entry {
    path: PathBuf,
    name: String,
    is_dir: bool,
}

/// Read non-hidden entries of `dir`, sorted by name.
fn read_sorted(dir: &Path) -> Result<Vec<Entry>, IndexError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| IndexError::io(dir, e))? {
        let entry = entry.map_err(|e| IndexError::io(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        let is_dir = entry
            .file_type()
            .map_err(|e| IndexError::io(&path, e))?
            .is_dir();
        entries.push(Entry { path, name, is_dir });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// Collect regular files below `dir`, depth-first in name order.
fn collect_files(dir: &Path) -> Result<Vec<File>, IndexError> {
    let mut files = Vec::new();
    for entry in read_sorted(dir)? {
        if entry.is_dir {
            files.extend(collect_files(&entry.path)?);
        } else {
            files.push(File::new(entry.path));
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn indexer() -> Indexer {
        Indexer::new(IndexerConfig::default())
    }

    fn indexer_with_policy(policy: UnknownItemPolicy) -> Indexer {
        Indexer::new(IndexerConfig {
            unknown_items: policy,
            ..IndexerConfig::default()
        })
    }

    fn visit_types(index: &Index) -> Vec<ItemType> {
        let mut types = Vec::new();
        index.root().walk(|item| types.push(item.item_type()));
        types
    }

    #[test]
    fn test_index_single_item() {
        let temp_dir = create_test_dir();
        write(&temp_dir.path().join("repository.md"), "# Repo");

        let index = indexer().index(temp_dir.path()).unwrap();

        assert_eq!(index.root().item_type(), ItemType::Repository);
        assert_eq!(index.root().path(), temp_dir.path().join("repository.md"));
        assert_eq!(
            index.root().rendered_path(),
            temp_dir.path().join("index.html")
        );
        assert_eq!(index.item_count(), 1);
    }

    #[test]
    fn test_index_nested_items_in_name_order() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        write(&root.join("repository.md"), "# Repo");
        write(&root.join("b-guide/document.md"), "# Guide");
        write(&root.join("a-blog/collection.md"), "# Blog");
        write(&root.join("a-blog/post-2/message.md"), "# Post 2");
        write(&root.join("a-blog/post-1/message.md"), "# Post 1");

        let index = indexer().index(root).unwrap();

        assert_eq!(
            visit_types(&index),
            [
                ItemType::Repository,
                ItemType::Collection,
                ItemType::Message,
                ItemType::Message,
                ItemType::Document,
            ]
        );
        let blog = &index.root().child_items()[0];
        assert_eq!(blog.child_items()[0].path(), root.join("a-blog/post-1/message.md"));
        assert_eq!(blog.child_items()[1].path(), root.join("a-blog/post-2/message.md"));
    }

    #[test]
    fn test_index_collects_files() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        write(&root.join("imagegallery.md"), "# Photos");
        write(&root.join("files/b.jpg"), "b");
        write(&root.join("files/a.jpg"), "a");
        write(&root.join("files/raw/c.png"), "c");
        write(&root.join("files/.DS_Store"), "");

        let index = indexer().index(root).unwrap();
        let names: Vec<String> = index.root().files().iter().map(File::filename).collect();

        assert_eq!(names, ["a.jpg", "b.jpg", "c.png"]);
        // The files directory is not an item
        assert!(index.root().child_items().is_empty());
    }

    #[test]
    fn test_index_custom_files_dir() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        write(&root.join("document.md"), "# Doc");
        write(&root.join("assets/logo.svg"), "<svg/>");
        write(&root.join("files/ignored.txt"), "x");

        let indexer = Indexer::new(IndexerConfig {
            files_dir: "assets".to_owned(),
            ..IndexerConfig::default()
        });
        let index = indexer.index(root).unwrap();

        assert_eq!(index.root().files(), &[File::new(root.join("assets/logo.svg"))]);
    }

    #[test]
    fn test_index_prefers_marker_over_other_markdown() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        write(&root.join("abstract.md"), "notes");
        write(&root.join("presentation.md"), "# Slides");

        let index = indexer().index(root).unwrap();

        assert_eq!(index.root().item_type(), ItemType::Presentation);
        assert_eq!(index.root().filename(), "presentation.md");
    }

    #[test]
    fn test_index_plain_directories_are_transparent() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        write(&root.join("repository.md"), "# Repo");
        write(&root.join("2024/05/tag.md"), "# Tag");
        write(&root.join("2024/notes.txt"), "not markdown");

        let index = indexer().index(root).unwrap();

        let children = index.root().child_items();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].item_type(), ItemType::Tag);
    }

    #[test]
    fn test_index_skips_hidden_directories() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        write(&root.join("repository.md"), "# Repo");
        write(&root.join(".git/document.md"), "# Hidden");

        let index = indexer().index(root).unwrap();

        assert!(index.root().child_items().is_empty());
    }

    #[test]
    fn test_unknown_item_warn_keeps_item() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        write(&root.join("repository.md"), "# Repo");
        write(&root.join("misc/notes.md"), "# Notes");

        let index = indexer_with_policy(UnknownItemPolicy::Warn)
            .index(root)
            .unwrap();

        assert_eq!(visit_types(&index), [ItemType::Repository, ItemType::Unknown]);
        assert_eq!(
            index.root().child_items()[0].rendered_path(),
            root.join("misc/index.html")
        );
    }

    #[test]
    fn test_unknown_item_skip_drops_subtree() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        write(&root.join("repository.md"), "# Repo");
        write(&root.join("misc/notes.md"), "# Notes");
        write(&root.join("misc/inner/document.md"), "# Inner");
        write(&root.join("guide/document.md"), "# Guide");

        let index = indexer_with_policy(UnknownItemPolicy::Skip)
            .index(root)
            .unwrap();

        assert_eq!(visit_types(&index), [ItemType::Repository, ItemType::Document]);
        assert_eq!(
            index.root().child_items()[0].path(),
            root.join("guide/document.md")
        );
    }

    #[test]
    fn test_unknown_item_abort_fails() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        write(&root.join("repository.md"), "# Repo");
        write(&root.join("misc/notes.md"), "# Notes");

        let result = indexer_with_policy(UnknownItemPolicy::Abort).index(root);

        let Err(IndexError::UnknownItem(err)) = result else {
            panic!("expected unknown item error");
        };
        assert_eq!(err.path(), root.join("misc/notes.md"));
    }

    #[test]
    fn test_read_sorted_reports_unreadable_directory() {
        let temp_dir = create_test_dir();
        let file = temp_dir.path().join("document.md");
        write(&file, "# Doc");

        let Err(IndexError::Io { path, .. }) = read_sorted(&file) else {
            panic!("expected I/O error");
        };
        assert_eq!(path, file);
    }

    #[test]
    fn test_read_sorted_skips_hidden_and_sorts() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        write(&root.join("b.md"), "");
        write(&root.join("a/x.md"), "");
        write(&root.join(".hidden"), "");

        let entries = read_sorted(root).unwrap();
        let names: Vec<(&str, bool)> = entries.iter().map(|e| (e.name.as_str(), e.is_dir)).collect();

        assert_eq!(names, [("a", true), ("b.md", false)]);
    }

    #[test]
    fn test_index_missing_root() {
        let result = indexer().index(Path::new("/nonexistent/repo"));
        assert!(matches!(result, Err(IndexError::NotFound(_))));
    }

    #[test]
    fn test_index_root_is_file() {
        let temp_dir = create_test_dir();
        let file = temp_dir.path().join("document.md");
        write(&file, "# Doc");

        let result = indexer().index(&file);
        assert!(matches!(result, Err(IndexError::NotADirectory(_))));
    }

    #[test]
    fn test_index_root_without_item() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        write(&root.join("guide/document.md"), "# Guide");

        let result = indexer().index(root);
        assert!(matches!(result, Err(IndexError::NoRootItem(_))));
    }

    #[test]
    fn test_index_empty_root() {
        let temp_dir = create_test_dir();
        let result = indexer().index(temp_dir.path());
        assert!(matches!(result, Err(IndexError::NoRootItem(_))));
    }

    #[test]
    fn test_index_repository_from_config() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path();
        fs::write(
            root.join("docs.toml"),
            "[repository]\npath = \"content\"\n\n[indexer]\nunknown_items = \"skip\"\n",
        )
        .unwrap();
        write(&root.join("content/repository.md"), "# Repo");
        write(&root.join("content/misc/notes.md"), "# Notes");

        let config = Config::load(Some(&root.join("docs.toml")), None).unwrap();
        let index = index_repository(&config).unwrap();

        assert_eq!(index.base_path(), root.join("content"));
        assert_eq!(index.item_count(), 1);
    }
}
