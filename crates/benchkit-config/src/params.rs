//! Parameter lists
//!
//! A parameter file holds one override per line: the first whitespace
//! delimited token is the parameter name, the rest of the line (trimmed) is
//! the replacement value.
//!
//! ```text
//! BatchTimeout 2s
//! MaxMessageCount 500
//! ```

use crate::error::ParamError;
use indexmap::IndexMap;
use std::fs;
use std::path::Path;

/// How lines starting with `#` are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentPolicy {
    /// `#` lines are ordinary parameter lines (a `# note` line yields a
    /// parameter named `#`)
    #[default]
    Literal,
    /// `#` lines are skipped
    Skip,
}

/// Parameters requested for change, drained as matches are applied
///
/// Iteration follows the order in which names first appeared in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingUpdates {
    entries: IndexMap<String, String>,
}

impl PendingUpdates {
    /// Create empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a parameter list from text
    #[must_use]
    pub fn parse(text: &str, comments: CommentPolicy) -> Self {
        let mut updates = Self::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || (comments == CommentPolicy::Skip && line.starts_with('#')) {
                continue;
            }
            match line.split_once(char::is_whitespace) {
                Some((name, value)) if !value.trim().is_empty() => {
                    updates.insert(name, value.trim());
                }
                _ => tracing::debug!(line, "skipping parameter line without a value"),
            }
        }
        updates
    }

    /// Read and parse a parameter file
    ///
    /// # Errors
    /// Returns error if the file cannot be read
    pub fn from_path(path: &Path, comments: CommentPolicy) -> Result<Self, ParamError> {
        let text = fs::read_to_string(path).map_err(|e| ParamError::io_error(path, e))?;
        let updates = Self::parse(&text, comments);
        tracing::info!(path = %path.display(), count = updates.len(), "loaded parameters");
        Ok(updates)
    }

    /// Insert or overwrite a parameter
    ///
    /// Overwriting keeps the position of the first occurrence.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Remove a parameter and return its replacement value
    pub fn take(&mut self, name: &str) -> Option<String> {
        self.entries.shift_remove(name)
    }

    /// Replacement value for a parameter
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Whether the parameter is still pending
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of pending parameters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is pending
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pending parameter names in input order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Pending `(name, value)` pairs in input order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Consume into the remaining names
    #[must_use]
    pub fn into_names(self) -> Vec<String> {
        self.entries.into_keys().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PendingUpdates {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut updates = Self::new();
        for (name, value) in iter {
            updates.insert(name, value);
        }
        updates
    }
}
