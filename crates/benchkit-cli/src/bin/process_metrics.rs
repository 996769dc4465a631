//! `process-metrics [--config FILE] [--base-dir DIR] [--lists-dir DIR] [--output-dir DIR]`

use anyhow::{Context, Result};
use benchkit_cli::{init_tracing, parse_args, process_metrics_command, FAILURE};
use benchkit_metrics::{process_docker, process_fabric, MetricsConfig};
use chrono::Local;
use clap::ArgMatches;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_tracing();
    let matches = match parse_args(process_metrics_command(), std::env::args_os()) {
        Ok(matches) => matches,
        Err(code) => return ExitCode::from(code),
    };

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            ExitCode::from(FAILURE)
        }
    }
}

fn load_config(matches: &ArgMatches) -> Result<MetricsConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => MetricsConfig::from_toml_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => MetricsConfig::new(),
    };
    if let Some(dir) = matches.get_one::<PathBuf>("base-dir") {
        config = config.with_base_dir(dir);
    }
    if let Some(dir) = matches.get_one::<PathBuf>("lists-dir") {
        config = config.with_lists_dir(dir);
    }
    if let Some(dir) = matches.get_one::<PathBuf>("output-dir") {
        config = config.with_output_dir(dir);
    }
    Ok(config)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let run = load_config(matches)?.resolve(Local::now());
    run.prepare().context("failed to create output directories")?;
    println!("Output directory: {}", run.output_dir.display());

    if matches.get_flag("skip-docker") {
        tracing::info!("docker stats skipped");
    } else {
        let docker = process_docker(&run).context("docker stats processing failed")?;
        println!(
            "Docker stats: {} nodes, {} tables",
            docker.nodes.len(),
            docker.tables.len()
        );
    }

    if matches.get_flag("skip-fabric") {
        tracing::info!("fabric metrics skipped");
    } else {
        let fabric = process_fabric(&run).context("fabric metrics processing failed")?;
        println!(
            "Fabric metrics: {} orderers, {} peers, {} tables",
            fabric.orderers.len(),
            fabric.peers.len(),
            fabric.tables.len()
        );
    }

    println!("Processing complete. Output saved to {}", run.output_dir.display());
    Ok(())
}
