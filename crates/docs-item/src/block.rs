//! Named text fragments attached to items.

use serde::Serialize;

/// Error returned when constructing an invalid [`Block`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BlockError {
    /// Block names identify the fragment in templates and cannot be empty.
    #[error("a block requires a non-empty name")]
    EmptyName,
}

/// A named text fragment consumed by templates.
///
/// Names are compared case-insensitively; see [`Block::matches`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    name: String,
    value: String,
}

impl Block {
    /// Create a block.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::EmptyName`] if `name` is empty.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self, BlockError> {
        let name = name.into();
        if name.is_empty() {
            return Err(BlockError::EmptyName);
        }
        Ok(Self {
            name,
            value: value.into(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Check whether this block is called `name`, ignoring case.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
