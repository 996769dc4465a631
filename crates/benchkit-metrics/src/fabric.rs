//! Fabric metrics reorganization
//!
//! Input: `<base>/fabric/<node>/<metric>.txt` dumps where each sample line
//! looks like `[2025-01-01 10:00:00] metric_name{labels} 42`. Node
//! directories are grouped by role from their name prefix; the metrics to
//! collect for each role come from the configured name lists.
//! Output: `<output>/fabric/<metric>.csv`, one column per node of the role.

use crate::config::RunConfig;
use crate::error::{MetricsError, MetricsResult};
use crate::table::MetricTable;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Node role, derived from the node directory name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// `orderer*`
    Orderer,
    /// `peer*`
    Peer,
}

impl Role {
    /// Role of a node directory, if any
    #[must_use]
    pub fn of(node: &str) -> Option<Self> {
        if node.starts_with("orderer") {
            Some(Self::Orderer)
        } else if node.starts_with("peer") {
            Some(Self::Peer)
        } else {
            None
        }
    }
}

/// Parse one dump line into `(timestamp, value)`
///
/// Only lines starting with `[` are samples. The value is the last token
/// between the first `]` and any following `]`.
#[must_use]
pub fn parse_sample(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('[')?;
    let mut parts = rest.split(']');
    let timestamp = parts.next()?.trim();
    let value = parts.next()?.split_whitespace().last()?;
    Some((timestamp, value))
}

/// Read a metric-name list: one name per non-blank line
///
/// # Errors
/// Returns error if the file cannot be read
pub fn read_metric_list(path: &Path) -> MetricsResult<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|e| MetricsError::io_error(path, e))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect())
}

/// What a Fabric pass produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FabricSummary {
    /// Orderer nodes, sorted
    pub orderers: Vec<String>,
    /// Peer nodes, sorted
    pub peers: Vec<String>,
    /// Written tables
    pub tables: Vec<PathBuf>,
}

/// Pivot every listed metric into one table per metric, then archive the raw
/// fabric tree
///
/// A metric listed for both roles is written twice to the same file; the
/// peer table is the one kept.
///
/// # Errors
/// Returns error if a list or the fabric tree is unreadable, or an output
/// cannot be written
pub fn process_fabric(run: &RunConfig) -> MetricsResult<FabricSummary> {
    let orderer_metrics = read_metric_list(&run.orderer_list)?;
    let peer_metrics = read_metric_list(&run.peer_list)?;

    let fabric_dir = run.fabric_dir();
    let mut nodes = role_nodes(&fabric_dir)?;
    let orderers = nodes.remove(&Role::Orderer).unwrap_or_default();
    let peers = nodes.remove(&Role::Peer).unwrap_or_default();

    let out_dir = run.output_dir.join("fabric");
    fs::create_dir_all(&out_dir).map_err(|e| MetricsError::io_error(&out_dir, e))?;
    let mut written = Vec::new();
    for (role, metrics, role_nodes) in [
        (Role::Orderer, &orderer_metrics, &orderers),
        (Role::Peer, &peer_metrics, &peers),
    ] {
        for (metric, table) in collect_role(&fabric_dir, metrics, role_nodes)? {
            let path = out_dir.join(format!("{metric}.csv"));
            if written.contains(&path) {
                tracing::warn!(metric = %metric, ?role, "metric listed for both roles, overwriting");
            }
            table.write_csv(&path, role_nodes)?;
            written.push(path);
        }
    }

    run.archive(&fabric_dir)?;
    tracing::info!(
        orderers = orderers.len(),
        peers = peers.len(),
        tables = written.len(),
        "fabric metrics processed"
    );

    Ok(FabricSummary {
        orderers,
        peers,
        tables: written,
    })
}

fn role_nodes(fabric_dir: &Path) -> MetricsResult<BTreeMap<Role, Vec<String>>> {
    let entries = fs::read_dir(fabric_dir).map_err(|e| MetricsError::io_error(fabric_dir, e))?;
    let mut nodes: BTreeMap<Role, Vec<String>> = BTreeMap::new();
    for entry in entries {
        let entry = entry.map_err(|e| MetricsError::io_error(fabric_dir, e))?;
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(role) = Role::of(&name) {
            nodes.entry(role).or_default().push(name);
        }
    }
    for list in nodes.values_mut() {
        list.sort();
    }
    Ok(nodes)
}

/// Tables for the metrics of one role; metrics without samples are omitted
fn collect_role<'m>(
    fabric_dir: &Path,
    metrics: &'m [String],
    nodes: &[String],
) -> MetricsResult<Vec<(&'m str, MetricTable)>> {
    let mut tables = Vec::new();
    for metric in metrics {
        let mut table = MetricTable::new();
        for node in nodes {
            let path = fabric_dir.join(node).join(format!("{metric}.txt"));
            if !path.is_file() {
                continue;
            }
            let text = fs::read_to_string(&path).map_err(|e| MetricsError::io_error(&path, e))?;
            for (timestamp, value) in text.lines().filter_map(parse_sample) {
                table.insert(timestamp, node.as_str(), value);
            }
        }
        if table.is_empty() {
            tracing::debug!(metric = %metric, "no samples");
        } else {
            tables.push((metric.as_str(), table));
        }
    }
    Ok(tables)
}
