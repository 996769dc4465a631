//! Error types for metrics processing

use std::path::PathBuf;

/// Errors while extracting or reorganizing benchmark output
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Filesystem error
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV read or write error
    #[error("csv error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Monitor CSV lacks a tracked column
    #[error("{path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: String },

    /// Run configuration file could not be parsed
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Report label produced an invalid pattern
    #[error("invalid report pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl MetricsError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create CSV error for path
    pub fn csv_error(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for metrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_display() {
        let err = MetricsError::MissingColumn {
            path: PathBuf::from("peer0/docker_monitor.csv"),
            column: "cpu_percentage".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "peer0/docker_monitor.csv has no 'cpu_percentage' column"
        );
    }

    #[test]
    fn io_error_keeps_path() {
        let err = MetricsError::io_error(
            "/metrics/docker",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("/metrics/docker"));
    }
}
