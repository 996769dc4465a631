//! Compose environment-list patcher
//!
//! Rewrites `KEY=VALUE` entries in the `environment` lists of Compose
//! services. Unlike [`patch`](crate::patch), a parameter is never consumed:
//! one override fans out to every service exporting the variable.

use crate::document::{Document, Key, Mapping};
use crate::error::DocumentError;
use crate::params::PendingUpdates;
use std::collections::BTreeSet;
use std::fmt;

/// One rewritten environment entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvModification {
    /// Service that owns the entry
    pub service: String,
    /// Variable name
    pub key: String,
    /// New value
    pub value: String,
}

impl fmt::Display for EnvModification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "service '{}': environment variable '{}' = {}",
            self.service, self.key, self.value
        )
    }
}

/// Outcome of an environment-list patch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvPatchReport {
    /// Every rewritten entry, in document order
    pub modifications: Vec<EnvModification>,
    /// Names of services with at least one rewritten entry
    pub services: BTreeSet<String>,
}

impl EnvPatchReport {
    /// Total number of rewritten entries
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.modifications.len()
    }
}

/// Patch every service's `environment` list in a service table
pub fn patch_env_list(services: &mut Mapping, pending: &PendingUpdates) -> EnvPatchReport {
    let mut report = EnvPatchReport::default();

    for (name, service) in services.iter_mut() {
        let Some(Document::Sequence(environment)) = service.get_mut("environment") else {
            tracing::debug!(service = %name, "no environment list");
            continue;
        };
        let service_name = name.to_string();

        for item in environment.iter_mut() {
            let Some(entry) = item.as_str() else {
                continue;
            };
            let Some((key, new_value)) = rewrite_entry(entry, pending) else {
                continue;
            };
            *item = Document::string(format!("{key}={new_value}"));
            tracing::debug!(service = %service_name, key = %key, "rewrote environment entry");
            report.services.insert(service_name.clone());
            report.modifications.push(EnvModification {
                service: service_name.clone(),
                key,
                value: new_value,
            });
        }
    }

    report
}

/// Locate the top-level `services` table of a Compose document and patch it
///
/// # Errors
/// Returns [`DocumentError::MissingServices`] if the document has no
/// `services` mapping
pub fn patch_compose(
    document: &mut Document,
    pending: &PendingUpdates,
) -> Result<EnvPatchReport, DocumentError> {
    let services = document
        .as_mapping_mut()
        .and_then(|root| root.get_mut(&Key::from("services")))
        .and_then(Document::as_mapping_mut)
        .ok_or(DocumentError::MissingServices)?;
    Ok(patch_env_list(services, pending))
}

/// New `(key, value)` for an entry whose variable is pending
///
/// Comment entries and entries without `=` are left alone.
fn rewrite_entry(entry: &str, pending: &PendingUpdates) -> Option<(String, String)> {
    if entry.trim_start().starts_with('#') {
        return None;
    }
    let (key, _) = entry.split_once('=')?;
    let key = key.trim();
    pending
        .get(key)
        .map(|value| (key.to_string(), value.to_string()))
}
