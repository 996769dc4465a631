//! `patch-env-list <compose-file> <parameter-file>`

use benchkit_cli::{init_tracing, parse_args, patch_env_list_command, FAILURE};
use benchkit_config::patch_compose_file;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_tracing();
    let matches = match parse_args(patch_env_list_command(), std::env::args_os()) {
        Ok(matches) => matches,
        Err(code) => return ExitCode::from(code),
    };
    let (Some(compose), Some(parameters)) = (
        matches.get_one::<PathBuf>("compose"),
        matches.get_one::<PathBuf>("parameters"),
    ) else {
        return ExitCode::from(FAILURE);
    };

    println!("Compose file: {}", compose.display());
    println!("Parameter file: {}", parameters.display());

    match patch_compose_file(compose, parameters) {
        Ok(report) => {
            for modification in &report.modifications {
                println!("  - {modification}");
            }
            println!("Modified {} environment entries", report.count());
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("ERROR: {e}");
            ExitCode::from(FAILURE)
        }
    }
}
