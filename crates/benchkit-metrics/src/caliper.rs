//! Caliper summary report extraction
//!
//! Every run directory under a metrics root holds a `summary_table.log`
//! with Caliper's ASCII result table. The row for one round is pulled out
//! of each and collected into a single CSV.

use crate::error::{MetricsError, MetricsResult};
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Summary log expected in each run directory
pub const SUMMARY_LOG: &str = "summary_table.log";

/// Round reported by default
pub const DEFAULT_ROUND_LABEL: &str = "Create a car.";

const TABLE_BORDER: &str = "+---------------+------+------+";
const SNIPPET_CHARS: usize = 500;

/// One run's results for the selected round
///
/// Numbers are kept as they appear in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRecord {
    /// Run directory name
    pub source: String,
    #[serde(rename = "Succ")]
    pub succ: String,
    #[serde(rename = "Fail")]
    pub fail: String,
    #[serde(rename = "Send Rate (TPS)")]
    pub send_rate: String,
    #[serde(rename = "Max Latency (s)")]
    pub max_latency: String,
    #[serde(rename = "Min Latency (s)")]
    pub min_latency: String,
    #[serde(rename = "Avg Latency (s)")]
    pub avg_latency: String,
    #[serde(rename = "Throughput (TPS)")]
    pub throughput: String,
}

/// Matcher for one round's row in a Caliper summary table
#[derive(Debug, Clone)]
pub struct RoundMatcher {
    pattern: Regex,
}

impl RoundMatcher {
    /// Build a matcher for the row labelled `label`
    ///
    /// # Errors
    /// Returns error if the pattern cannot be compiled
    pub fn new(label: &str) -> MetricsResult<Self> {
        let decimal = r"\s*(\d+\.\d+)\s*\|";
        let pattern = format!(
            r"\|\s*{}\s*\|\s*(\d+)\s*\|\s*(\d+)\s*\|{}",
            regex::escape(label),
            decimal.repeat(5)
        );
        Ok(Self {
            pattern: Regex::new(&pattern)?,
        })
    }

    /// Extract the round's row from log content
    #[must_use]
    pub fn extract(&self, content: &str, source: &str) -> Option<ReportRecord> {
        let caps = self.pattern.captures(content)?;
        let group = |i: usize| caps.get(i).map_or_else(String::new, |m| m.as_str().to_string());
        Some(ReportRecord {
            source: source.to_string(),
            succ: group(1),
            fail: group(2),
            send_rate: group(3),
            max_latency: group(4),
            min_latency: group(5),
            avg_latency: group(6),
            throughput: group(7),
        })
    }
}

/// Part of a log worth showing when the row could not be found
///
/// The table from its top border if present, otherwise the head of the log.
#[must_use]
pub fn diagnostic_snippet(content: &str) -> String {
    let start = content.find(TABLE_BORDER).unwrap_or(0);
    content[start..].chars().take(SNIPPET_CHARS).collect()
}

/// Outcome of scanning a metrics root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Extracted records in directory-name order
    pub records: Vec<ReportRecord>,
    /// Run directories whose log had no matching row
    pub failed: Vec<String>,
}

/// Extract the round's row from every run directory under `root`
///
/// Directories are visited in name order; names starting with `.` or `_`
/// and directories without a summary log are skipped.
///
/// # Errors
/// Returns error if `root` or a summary log cannot be read
pub fn scan_runs(root: &Path, matcher: &RoundMatcher) -> MetricsResult<ScanResult> {
    let mut result = ScanResult::default();

    for (name, dir) in run_directories(root)? {
        let log = dir.join(SUMMARY_LOG);
        if !log.is_file() {
            continue;
        }
        tracing::info!(run = %name, "processing");
        let content = fs::read_to_string(&log).map_err(|e| MetricsError::io_error(&log, e))?;
        match matcher.extract(&content, &name) {
            Some(record) => result.records.push(record),
            None => {
                tracing::warn!(
                    path = %log.display(),
                    snippet = %diagnostic_snippet(&content),
                    "could not extract data"
                );
                result.failed.push(name);
            }
        }
    }

    Ok(result)
}

fn run_directories(root: &Path) -> MetricsResult<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(root).map_err(|e| MetricsError::io_error(root, e))?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MetricsError::io_error(root, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || name.starts_with('_') || !entry.path().is_dir() {
            continue;
        }
        dirs.push((name, entry.path()));
    }
    dirs.sort();
    Ok(dirs)
}

/// Write records as CSV, header first
///
/// Returns the number of records written. Nothing is written for an empty
/// slice.
///
/// # Errors
/// Returns error if the file cannot be created or written
pub fn write_report(records: &[ReportRecord], output: &Path) -> MetricsResult<usize> {
    if records.is_empty() {
        tracing::warn!("no data to save");
        return Ok(0);
    }
    let mut writer = csv::Writer::from_path(output).map_err(|e| MetricsError::csv_error(output, e))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| MetricsError::csv_error(output, e))?;
    }
    writer
        .flush()
        .map_err(|e| MetricsError::io_error(output, e))?;
    Ok(records.len())
}
