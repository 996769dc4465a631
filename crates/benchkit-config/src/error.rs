//! Error types for configuration patching
//!
//! Provides error handling for:
//! - Parameter file loading
//! - Document conversion (YAML value → typed tree)
//! - Load and store of the document file

use std::path::PathBuf;

/// Errors while reading a parameter list
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contained no usable `<key> <value>` line
    #[error("no legal parameters found in {path}")]
    NoParameters { path: PathBuf },
}

impl ParamError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors converting between YAML values and [`Document`](crate::Document) trees
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Malformed YAML
    #[error("syntax error: {0}")]
    Syntax(#[from] serde_yaml::Error),

    /// Mapping key is not a string, integer, boolean or null
    #[error("unsupported mapping key: {0}")]
    UnsupportedKey(String),

    /// Compose file has no top-level `services` mapping
    #[error("compose document has no 'services' mapping")]
    MissingServices,
}

/// Errors during load, patch and store of a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error during file write
    #[error("io error writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not a document the tree model can represent
    #[error("invalid document {path}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    /// YAML emitter failure
    #[error("serialization failed: {0}")]
    Serialize(#[source] serde_yaml::Error),

    /// Parameter file error
    #[error(transparent)]
    Param(#[from] ParamError),
}

impl ConfigError {
    /// Create read error for path
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create write error for path
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Attach a path to a document conversion error
    pub fn document_error(path: impl Into<PathBuf>, source: DocumentError) -> Self {
        Self::Document {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_error_display() {
        let err = ParamError::NoParameters {
            path: PathBuf::from("params.txt"),
        };
        assert_eq!(err.to_string(), "no legal parameters found in params.txt");
    }

    #[test]
    fn document_error_display() {
        let err = DocumentError::UnsupportedKey("[1, 2]".to_string());
        assert_eq!(err.to_string(), "unsupported mapping key: [1, 2]");
        assert!(DocumentError::MissingServices.to_string().contains("services"));
    }

    #[test]
    fn error_conversions() {
        let param_err = ParamError::NoParameters {
            path: PathBuf::from("p.txt"),
        };
        let config_err: ConfigError = param_err.into();
        assert!(matches!(config_err, ConfigError::Param(_)));
    }

    #[test]
    fn write_error_keeps_path() {
        let err = ConfigError::write_error(
            "configtx.yaml",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("configtx.yaml"));
    }
}
