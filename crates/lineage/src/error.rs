use std::path::PathBuf;
use thiserror::Error;

/// Result type for lineage operations
pub type Result<T> = std::result::Result<T, LineageError>;

/// Errors raised while reading, validating or writing lineage tables
#[derive(Error, Debug)]
pub enum LineageError {
    /// Input table does not follow the expected schema
    #[error("Format error at line {line}: {message}")]
    Format { line: usize, message: String },

    /// Input path unreadable or output path unwritable
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid table configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl LineageError {
    /// Create a format error for a 1-based line number
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// Create an IO error bound to the path that caused it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
