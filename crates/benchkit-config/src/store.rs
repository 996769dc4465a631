//! Document load and write-back
//!
//! Writes go to a temporary file next to the target which is then renamed
//! over it, so a failed write never leaves a half-written configuration.
//! Symlinks are followed and the target keeps its permissions.

use crate::document::Document;
use crate::error::{ConfigError, ConfigResult};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Read and parse a YAML document
///
/// # Errors
/// Returns error if the file cannot be read or is not a representable
/// YAML document
pub fn load_document(path: &Path) -> ConfigResult<Document> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
    let document =
        Document::from_yaml_str(&text).map_err(|e| ConfigError::document_error(path, e))?;
    tracing::info!(path = %path.display(), "loaded document");
    Ok(document)
}

/// Serialize a document and atomically replace `path` with it
///
/// When `path` is a symlink the file it points to is replaced.
///
/// # Errors
/// Returns error if serialization fails or the file cannot be replaced
pub fn save_document(document: &Document, path: &Path) -> ConfigResult<()> {
    let text = document.to_yaml_string().map_err(ConfigError::Serialize)?;

    let target = resolve_target(path).map_err(|e| ConfigError::write_error(path, e))?;
    let permissions = match fs::metadata(&target) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(ConfigError::write_error(path, e)),
    };

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ConfigError::write_error(path, e))?;
    tmp.write_all(text.as_bytes())
        .and_then(|()| match permissions {
            Some(permissions) => tmp.as_file().set_permissions(permissions),
            None => Ok(()),
        })
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| ConfigError::write_error(path, e))?;
    tmp.persist(&target)
        .map_err(|e| ConfigError::write_error(path, e.error))?;

    tracing::info!(path = %target.display(), bytes = text.len(), "wrote document");
    Ok(())
}

/// Final file behind `path`; a path that does not exist yet is used as is
fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e),
    }
}
