//! Timestamp × node pivot tables

use crate::error::{MetricsError, MetricsResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One metric's samples keyed by timestamp then node
///
/// Timestamps sort lexicographically, which matches chronological order for
/// the fixed-width formats the collectors emit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricTable {
    rows: BTreeMap<String, BTreeMap<String, String>>,
}

impl MetricTable {
    /// Create empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample, replacing any earlier one for the same cell
    pub fn insert(&mut self, timestamp: impl Into<String>, node: impl Into<String>, value: impl Into<String>) {
        self.rows
            .entry(timestamp.into())
            .or_default()
            .insert(node.into(), value.into());
    }

    /// Number of distinct timestamps
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no sample was recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of one cell
    #[must_use]
    pub fn get(&self, timestamp: &str, node: &str) -> Option<&str> {
        self.rows.get(timestamp)?.get(node).map(String::as_str)
    }

    /// Write as CSV with header `timestamp,<nodes...>`; absent cells are empty
    ///
    /// # Errors
    /// Returns error if the file cannot be created or written
    pub fn write_csv(&self, path: &Path, nodes: &[String]) -> MetricsResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| MetricsError::io_error(parent, e))?;
        }
        let mut writer = csv::Writer::from_path(path).map_err(|e| MetricsError::csv_error(path, e))?;

        let header = std::iter::once("timestamp").chain(nodes.iter().map(String::as_str));
        writer
            .write_record(header)
            .map_err(|e| MetricsError::csv_error(path, e))?;

        for (timestamp, cells) in &self.rows {
            let row = std::iter::once(timestamp.as_str()).chain(
                nodes
                    .iter()
                    .map(|node| cells.get(node).map_or("", String::as_str)),
            );
            writer
                .write_record(row)
                .map_err(|e| MetricsError::csv_error(path, e))?;
        }

        writer
            .flush()
            .map_err(|e| MetricsError::io_error(path, e))?;
        tracing::debug!(path = %path.display(), rows = self.rows.len(), "wrote metric table");
        Ok(())
    }
}
