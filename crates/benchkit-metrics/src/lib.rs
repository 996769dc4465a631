//! benchkit metrics processing
//!
//! Post-processing for benchmark runs:
//!
//! - **Report extraction**: pull one round's results out of every run's
//!   Caliper summary log into a single CSV ([`scan_runs`], [`write_report`])
//! - **Docker stats**: pivot per-node monitor CSVs into per-metric tables
//!   ([`process_docker`])
//! - **Fabric metrics**: pivot per-node metric dumps into per-metric tables
//!   ([`process_fabric`])
//!
//! Every operation takes a [`RunConfig`] describing where to read, write and
//! archive; nothing is read from process-wide state.
//!
//! ```text
//! <base>/docker/<node>/docker_monitor.csv ─┐
//! <base>/fabric/<node>/<metric>.txt ───────┼→ <output>/{docker,fabric}/<metric>.csv
//!                                          └→ <output>/backup/{docker,fabric}
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod caliper;
pub mod config;
pub mod docker;
pub mod error;
pub mod fabric;
pub mod table;

pub use caliper::{scan_runs, write_report, ReportRecord, RoundMatcher, ScanResult};
pub use config::{MetricsConfig, RunConfig};
pub use docker::{process_docker, DockerSummary};
pub use error::{MetricsError, MetricsResult};
pub use fabric::{process_fabric, FabricSummary, Role};
pub use table::MetricTable;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
