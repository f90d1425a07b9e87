//! Item classification by marker filename.
//!
//! Every item directory holds one marker file whose (case-insensitive)
//! basename selects the item's [`ItemType`]. The mapping lives in a single
//! table so the taxonomy can be listed and extended in one place.

use std::fmt;

use serde::Serialize;

/// Kind of repository item, used by renderers to pick a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Filename matches none of the known markers.
    Unknown,
    Document,
    Presentation,
    Collection,
    Message,
    ImageGallery,
    Location,
    Comment,
    Tag,
    Repository,
}

/// Marker filenames (lowercase) and the item type each one selects.
const MARKERS: &[(&str, ItemType)] = &[
    ("document.md", ItemType::Document),
    ("readme.md", ItemType::Document),
    ("presentation.md", ItemType::Presentation),
    ("collection.md", ItemType::Collection),
    ("message.md", ItemType::Message),
    ("imagegallery.md", ItemType::ImageGallery),
    ("location.md", ItemType::Location),
    ("comment.md", ItemType::Comment),
    ("tag.md", ItemType::Tag),
    ("repository.md", ItemType::Repository),
];

impl ItemType {
    /// All item types, `Unknown` first.
    pub const ALL: [Self; 10] = [
        Self::Unknown,
        Self::Document,
        Self::Presentation,
        Self::Collection,
        Self::Message,
        Self::ImageGallery,
        Self::Location,
        Self::Comment,
        Self::Tag,
        Self::Repository,
    ];

    /// Classify a file by its basename.
    ///
    /// Matching is case-insensitive. Returns [`ItemType::Unknown`] when the
    /// name is not a marker filename.
    #[must_use]
    pub fn from_filename(filename: &str) -> Self {
        let lowercase = filename.to_lowercase();
        MARKERS
            .iter()
            .find(|(marker, _)| *marker == lowercase)
            .map_or(Self::Unknown, |(_, item_type)| *item_type)
    }

    /// Marker filenames recognized by [`ItemType::from_filename`], in table order.
    pub fn marker_filenames() -> impl Iterator<Item = &'static str> {
        MARKERS.iter().map(|(marker, _)| *marker)
    }

    /// Stable lowercase name (e.g. `"imagegallery"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Document => "document",
            Self::Presentation => "presentation",
            Self::Collection => "collection",
            Self::Message => "message",
            Self::ImageGallery => "imagegallery",
            Self::Location => "location",
            Self::Comment => "comment",
            Self::Tag => "tag",
            Self::Repository => "repository",
        }
    }

    #[must_use]
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
