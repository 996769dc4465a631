//! Shared plumbing for the benchkit command line tools
//!
//! Each tool is its own binary; this crate holds their argument definitions
//! and the bits they have in common (logging setup, argument-error exit
//! codes).

#![warn(missing_docs)]
#![warn(unreachable_pub)]

use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Exit code for a completed run
pub const SUCCESS: u8 = 0;

/// Exit code for usage errors and failed runs
pub const FAILURE: u8 = 1;

/// Install the stderr log subscriber
///
/// Defaults to `warn`; `RUST_LOG` overrides.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parse arguments, mapping clap's outcome onto the tools' exit codes
///
/// `--help` and `--version` print and yield `Err(SUCCESS)`; any other
/// argument error prints the usage and yields `Err(FAILURE)`.
///
/// # Errors
/// Returns the exit code to terminate with when the run should not proceed
pub fn parse_args<I, T>(command: Command, args: I) -> Result<ArgMatches, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    command.try_get_matches_from(args).map_err(|err| {
        let _ = err.print();
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => SUCCESS,
            _ => FAILURE,
        }
    })
}

fn path_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help(help)
}

/// `patch-config <document-file> <parameter-file>`
#[must_use]
pub fn patch_config_command() -> Command {
    Command::new("patch-config")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Overwrite YAML configuration values from a parameter list, keeping numeric types")
        .arg(path_arg("document", "YAML file to patch in place (e.g. configtx.yaml)"))
        .arg(path_arg("parameters", "Parameter list: one '<name> <value>' per line"))
}

/// `patch-env-list <compose-file> <parameter-file>`
#[must_use]
pub fn patch_env_list_command() -> Command {
    Command::new("patch-env-list")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rewrite KEY=VALUE entries in Compose service environment lists")
        .arg(path_arg("compose", "Compose file to patch in place"))
        .arg(path_arg(
            "parameters",
            "Parameter list: one '<VAR> <value>' per line, '#' lines ignored",
        ))
}

/// `extract-report [--root DIR] [--output FILE] [--label TEXT]`
#[must_use]
pub fn extract_report_command() -> Command {
    Command::new("extract-report")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Collect one round of every run's Caliper summary into a CSV")
        .arg(
            Arg::new("root")
                .long("root")
                .default_value("/root/ruc/experiments/metrics")
                .value_parser(value_parser!(PathBuf))
                .help("Directory whose subdirectories are benchmark runs"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .default_value("caliper_reports.csv")
                .value_parser(value_parser!(PathBuf))
                .help("CSV file to write"),
        )
        .arg(
            Arg::new("label")
                .long("label")
                .default_value(benchkit_metrics::caliper::DEFAULT_ROUND_LABEL)
                .help("Round name as it appears in the summary table"),
        )
}

/// `process-metrics [--config FILE] [--base-dir DIR] ...`
#[must_use]
pub fn process_metrics_command() -> Command {
    Command::new("process-metrics")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Pivot Docker and Fabric monitoring output into per-metric tables")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_parser(value_parser!(PathBuf))
                .help("TOML run configuration"),
        )
        .arg(
            Arg::new("base-dir")
                .long("base-dir")
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the raw docker/ and fabric/ trees"),
        )
        .arg(
            Arg::new("lists-dir")
                .long("lists-dir")
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the Fabric metric-name lists"),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .value_parser(value_parser!(PathBuf))
                .help("Output directory (default: <base-dir>/<timestamp>)"),
        )
        .arg(
            Arg::new("skip-docker")
                .long("skip-docker")
                .action(ArgAction::SetTrue)
                .help("Do not process Docker stats"),
        )
        .arg(
            Arg::new("skip-fabric")
                .long("skip-fabric")
                .action(ArgAction::SetTrue)
                .help("Do not process Fabric metrics"),
        )
}
