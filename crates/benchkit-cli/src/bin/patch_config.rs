//! `patch-config <document-file> <parameter-file>`

use benchkit_cli::{init_tracing, parse_args, patch_config_command, FAILURE};
use benchkit_config::{patch_config_file, ConfigError, ParamError};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_tracing();
    let matches = match parse_args(patch_config_command(), std::env::args_os()) {
        Ok(matches) => matches,
        Err(code) => return ExitCode::from(code),
    };
    let (Some(document), Some(parameters)) = (
        matches.get_one::<PathBuf>("document"),
        matches.get_one::<PathBuf>("parameters"),
    ) else {
        return ExitCode::from(FAILURE);
    };

    match patch_config_file(document, parameters) {
        Ok(outcome) if outcome.is_complete() => {
            println!("SUCCESS: Modified {} parameters", outcome.applied);
            ExitCode::SUCCESS
        }
        Ok(outcome) => {
            println!(
                "WARNING: parameters not found in configuration: {}",
                outcome.unresolved.join(", ")
            );
            ExitCode::SUCCESS
        }
        Err(ConfigError::Param(ParamError::NoParameters { .. })) => {
            println!("ERROR: no legal parameters found");
            ExitCode::from(FAILURE)
        }
        Err(e) => {
            println!("ERROR: {e}");
            ExitCode::from(FAILURE)
        }
    }
}
