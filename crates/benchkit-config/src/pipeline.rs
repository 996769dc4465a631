//! File-level patch runs
//!
//! Each run is load → patch in memory → write back. Nothing is written
//! unless loading and patching both succeed.

use crate::env_list::{patch_compose, EnvPatchReport};
use crate::error::{ConfigError, ConfigResult, ParamError};
use crate::params::{CommentPolicy, PendingUpdates};
use crate::patcher::patch;
use crate::store::{load_document, save_document};
use std::path::Path;

/// Outcome of a tree patch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    /// Parameters applied
    pub applied: usize,
    /// Parameters not found in the document, in input order
    pub unresolved: Vec<String>,
}

impl PatchOutcome {
    /// Whether every requested parameter was applied
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Apply a parameter file to a YAML configuration file in place
///
/// Unresolved parameters are reported in the outcome, not as errors. The
/// document is written back even when some parameters were unresolved.
///
/// # Errors
/// Returns error if the parameter file is unreadable or empty, the document
/// cannot be loaded, or the write-back fails
pub fn patch_config_file(document_path: &Path, params_path: &Path) -> ConfigResult<PatchOutcome> {
    let mut pending = PendingUpdates::from_path(params_path, CommentPolicy::Literal)?;
    if pending.is_empty() {
        return Err(ParamError::NoParameters {
            path: params_path.to_path_buf(),
        }
        .into());
    }

    let mut document = load_document(document_path)?;
    let applied = patch(&mut document, &mut pending);
    for name in pending.names() {
        tracing::info!(parameter = name, "parameter not found in configuration");
    }
    save_document(&document, document_path)?;

    Ok(PatchOutcome {
        applied,
        unresolved: pending.into_names(),
    })
}

/// Apply a parameter file to the environment lists of a Compose file in place
///
/// # Errors
/// Returns error if either file cannot be read, the Compose file has no
/// `services` mapping, or the write-back fails
pub fn patch_compose_file(compose_path: &Path, params_path: &Path) -> ConfigResult<EnvPatchReport> {
    let pending = PendingUpdates::from_path(params_path, CommentPolicy::Skip)?;

    let mut document = load_document(compose_path)?;
    let report = patch_compose(&mut document, &pending)
        .map_err(|e| ConfigError::document_error(compose_path, e))?;
    save_document(&document, compose_path)?;

    Ok(report)
}
