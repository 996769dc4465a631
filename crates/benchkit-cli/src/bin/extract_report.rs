//! `extract-report [--root DIR] [--output FILE] [--label TEXT]`

use anyhow::{Context, Result};
use benchkit_cli::{extract_report_command, init_tracing, parse_args, FAILURE};
use benchkit_metrics::{scan_runs, write_report, RoundMatcher};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    init_tracing();
    let matches = match parse_args(extract_report_command(), std::env::args_os()) {
        Ok(matches) => matches,
        Err(code) => return ExitCode::from(code),
    };
    let (Some(root), Some(output), Some(label)) = (
        matches.get_one::<PathBuf>("root"),
        matches.get_one::<PathBuf>("output"),
        matches.get_one::<String>("label"),
    ) else {
        return ExitCode::from(FAILURE);
    };

    match run(root, output, label) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            ExitCode::from(FAILURE)
        }
    }
}

fn run(root: &Path, output: &Path, label: &str) -> Result<()> {
    let matcher = RoundMatcher::new(label).context("invalid round label")?;
    let scan = scan_runs(root, &matcher)
        .with_context(|| format!("failed to scan {}", root.display()))?;

    for source in &scan.failed {
        println!("Could not find '{label}' results in {source}");
    }

    let saved = write_report(&scan.records, output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    if saved == 0 {
        println!("No data to save.");
    } else {
        println!("Successfully saved {saved} records to {}", output.display());
    }
    Ok(())
}
