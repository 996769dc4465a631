//! Docker stats reorganization
//!
//! Input: `<base>/docker/<node>/docker_monitor.csv`, one row per sample
//! with a `timestamp` column and one column per tracked metric.
//! Output: `<output>/docker/<metric>.csv`, one column per node.

use crate::config::RunConfig;
use crate::error::{MetricsError, MetricsResult};
use crate::table::MetricTable;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-node monitor file name
pub const MONITOR_CSV: &str = "docker_monitor.csv";

/// What a Docker pass produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DockerSummary {
    /// Nodes with a monitor file, sorted
    pub nodes: Vec<String>,
    /// Written tables
    pub tables: Vec<PathBuf>,
}

/// Pivot every node's monitor CSV into one table per metric, then archive
/// the raw docker tree
///
/// # Errors
/// Returns error if the docker tree is unreadable, a monitor file lacks a
/// tracked column, or an output cannot be written
pub fn process_docker(run: &RunConfig) -> MetricsResult<DockerSummary> {
    let docker_dir = run.docker_dir();
    let nodes = monitored_nodes(&docker_dir)?;

    let mut tables: BTreeMap<&str, MetricTable> = run
        .docker_metrics
        .iter()
        .map(|metric| (metric.as_str(), MetricTable::new()))
        .collect();

    for node in &nodes {
        let path = docker_dir.join(node).join(MONITOR_CSV);
        read_monitor(&path, node, &run.docker_metrics, &mut tables)?;
    }

    let out_dir = run.output_dir.join("docker");
    fs::create_dir_all(&out_dir).map_err(|e| MetricsError::io_error(&out_dir, e))?;
    let mut written = Vec::with_capacity(tables.len());
    for (metric, table) in &tables {
        let path = out_dir.join(format!("{metric}.csv"));
        table.write_csv(&path, &nodes)?;
        written.push(path);
    }

    run.archive(&docker_dir)?;
    tracing::info!(nodes = nodes.len(), tables = written.len(), "docker metrics processed");

    Ok(DockerSummary {
        nodes,
        tables: written,
    })
}

fn monitored_nodes(docker_dir: &Path) -> MetricsResult<Vec<String>> {
    let entries = fs::read_dir(docker_dir).map_err(|e| MetricsError::io_error(docker_dir, e))?;
    let mut nodes = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MetricsError::io_error(docker_dir, e))?;
        let path = entry.path();
        if path.is_dir() && path.join(MONITOR_CSV).is_file() {
            nodes.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    nodes.sort();
    Ok(nodes)
}

fn read_monitor(
    path: &Path,
    node: &str,
    metrics: &[String],
    tables: &mut BTreeMap<&str, MetricTable>,
) -> MetricsResult<()> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| MetricsError::csv_error(path, e))?;
    let headers = reader
        .headers()
        .map_err(|e| MetricsError::csv_error(path, e))?
        .clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| MetricsError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
    };
    let timestamp_col = column("timestamp")?;
    let metric_cols = metrics
        .iter()
        .map(|metric| column(metric).map(|i| (metric.as_str(), i)))
        .collect::<MetricsResult<Vec<_>>>()?;

    let mut samples = 0usize;
    for record in reader.records() {
        let record = record.map_err(|e| MetricsError::csv_error(path, e))?;
        let timestamp = record.get(timestamp_col).unwrap_or_default();
        for &(metric, col) in &metric_cols {
            if let Some(table) = tables.get_mut(metric) {
                table.insert(timestamp, node, record.get(col).unwrap_or_default());
            }
        }
        samples += 1;
    }
    tracing::debug!(node, samples, "read docker monitor");
    Ok(())
}
