//! Run configuration for metrics processing
//!
//! [`MetricsConfig`] is what a user writes (TOML file and/or flags);
//! [`RunConfig`] is the resolved set of paths for one run, passed into every
//! processing operation.

use crate::error::{MetricsError, MetricsResult};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Timestamp format used to name a run's output directory
pub const RUN_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Docker stats columns pivoted by default
pub const DEFAULT_DOCKER_METRICS: [&str; 6] = [
    "cpu_percentage",
    "mem_percentage",
    "disk_read_rate",
    "disk_write_rate",
    "net_rx_rate",
    "net_tx_rate",
];

/// User-facing metrics configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Directory holding the raw `docker/` and `fabric/` trees
    pub base_dir: PathBuf,
    /// Directory holding the Fabric metric-name lists
    pub lists_dir: PathBuf,
    /// Output directory; defaults to `<base_dir>/<run stamp>`
    pub output_dir: Option<PathBuf>,
    /// Docker stats columns to pivot
    pub docker_metrics: Vec<String>,
    /// File in `lists_dir` naming orderer metrics
    pub orderer_list: String,
    /// File in `lists_dir` naming peer metrics
    pub peer_list: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("/root/ruc/experiments/metrics"),
            lists_dir: PathBuf::from("/root/ruc/experiments/config"),
            output_dir: None,
            docker_metrics: DEFAULT_DOCKER_METRICS.iter().map(ToString::to_string).collect(),
            orderer_list: "fabric_merge_orderer.txt".to_string(),
            peer_list: "fabric_merge_peer.txt".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn from_toml_file(path: &Path) -> MetricsResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| MetricsError::io_error(path, e))?;
        toml::from_str(&text).map_err(|source| MetricsError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// With base directory
    #[inline]
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// With lists directory
    #[inline]
    #[must_use]
    pub fn with_lists_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.lists_dir = dir.into();
        self
    }

    /// With explicit output directory
    #[inline]
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Resolve paths for a run started at `now`
    #[must_use]
    pub fn resolve(&self, now: DateTime<Local>) -> RunConfig {
        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| self.base_dir.join(now.format(RUN_STAMP_FORMAT).to_string()));
        RunConfig {
            base_dir: self.base_dir.clone(),
            backup_dir: output_dir.join("backup"),
            output_dir,
            docker_metrics: self.docker_metrics.clone(),
            orderer_list: self.lists_dir.join(&self.orderer_list),
            peer_list: self.lists_dir.join(&self.peer_list),
        }
    }
}

/// Resolved paths and settings for one processing run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Directory holding the raw `docker/` and `fabric/` trees
    pub base_dir: PathBuf,
    /// Where pivoted tables are written
    pub output_dir: PathBuf,
    /// Where raw trees are moved once processed
    pub backup_dir: PathBuf,
    /// Docker stats columns to pivot
    pub docker_metrics: Vec<String>,
    /// Orderer metric-name list
    pub orderer_list: PathBuf,
    /// Peer metric-name list
    pub peer_list: PathBuf,
}

impl RunConfig {
    /// Raw docker tree
    #[inline]
    #[must_use]
    pub fn docker_dir(&self) -> PathBuf {
        self.base_dir.join("docker")
    }

    /// Raw fabric tree
    #[inline]
    #[must_use]
    pub fn fabric_dir(&self) -> PathBuf {
        self.base_dir.join("fabric")
    }

    /// Create the output and backup directories
    ///
    /// # Errors
    /// Returns error if the directories cannot be created
    pub fn prepare(&self) -> MetricsResult<()> {
        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| MetricsError::io_error(&self.backup_dir, e))
    }

    /// Move a processed raw tree into the backup directory
    ///
    /// Falls back to copy and delete when the backup directory is on
    /// another filesystem.
    pub(crate) fn archive(&self, raw_dir: &Path) -> MetricsResult<PathBuf> {
        let name = raw_dir.file_name().unwrap_or(raw_dir.as_os_str());
        let target = self.backup_dir.join(name);
        match fs::rename(raw_dir, &target) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                tracing::debug!(from = %raw_dir.display(), "rename crosses devices, copying");
                copy_then_remove(raw_dir, &target)?;
            }
            Err(e) => return Err(MetricsError::io_error(raw_dir, e)),
        }
        tracing::info!(from = %raw_dir.display(), to = %target.display(), "archived raw metrics");
        Ok(target)
    }
}

/// Recursively copy `from` to `to`, then delete `from`
fn copy_then_remove(from: &Path, to: &Path) -> MetricsResult<()> {
    copy_tree(from, to)?;
    fs::remove_dir_all(from).map_err(|e| MetricsError::io_error(from, e))
}

fn copy_tree(from: &Path, to: &Path) -> MetricsResult<()> {
    fs::create_dir_all(to).map_err(|e| MetricsError::io_error(to, e))?;
    let entries = fs::read_dir(from).map_err(|e| MetricsError::io_error(from, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| MetricsError::io_error(from, e))?;
        let source = entry.path();
        let dest = to.join(entry.file_name());
        let file_type = entry
            .file_type()
            .map_err(|e| MetricsError::io_error(&source, e))?;
        if file_type.is_dir() {
            copy_tree(&source, &dest)?;
        } else {
            fs::copy(&source, &dest).map_err(|e| MetricsError::io_error(&source, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_output_dir_is_stamped_under_base() {
        let now = Local.with_ymd_and_hms(2025, 3, 7, 14, 5, 9).unwrap();
        let run = MetricsConfig::new().with_base_dir("/data/metrics").resolve(now);

        assert_eq!(run.output_dir, PathBuf::from("/data/metrics/20250307_140509"));
        assert_eq!(run.backup_dir, PathBuf::from("/data/metrics/20250307_140509/backup"));
        assert_eq!(run.docker_dir(), PathBuf::from("/data/metrics/docker"));
    }

    #[test]
    fn explicit_output_dir_wins() {
        let run = MetricsConfig::new()
            .with_output_dir("/tmp/out")
            .with_lists_dir("/cfg")
            .resolve(Local::now());

        assert_eq!(run.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(run.orderer_list, PathBuf::from("/cfg/fabric_merge_orderer.txt"));
    }

    #[test]
    fn copy_fallback_moves_whole_tree() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("fabric");
        fs::create_dir_all(raw.join("peer0")).unwrap();
        fs::write(raw.join("peer0/ledger_blockchain_height.txt"), "[t] x 1\n").unwrap();
        fs::write(raw.join("top.txt"), "top").unwrap();
        let target = dir.path().join("backup/fabric");

        copy_then_remove(&raw, &target).unwrap();

        assert!(!raw.exists());
        assert_eq!(
            fs::read_to_string(target.join("peer0/ledger_blockchain_height.txt")).unwrap(),
            "[t] x 1\n"
        );
        assert_eq!(fs::read_to_string(target.join("top.txt")).unwrap(), "top");
    }

    #[test]
    fn toml_fields_default_when_missing() {
        let config: MetricsConfig = toml::from_str(
            "base_dir = \"/srv/metrics\"\ndocker_metrics = [\"cpu_percentage\"]\n",
        )
        .unwrap();

        assert_eq!(config.base_dir, PathBuf::from("/srv/metrics"));
        assert_eq!(config.docker_metrics, ["cpu_percentage"]);
        assert_eq!(config.peer_list, "fabric_merge_peer.txt");
        assert_eq!(config.output_dir, None);
    }
}
