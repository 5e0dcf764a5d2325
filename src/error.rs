//! Crate error type.
//!
//! Only configuration and input problems are recoverable. Dimension
//! mismatches and other contract breaches panic at the call site.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced before or around a run.
#[derive(Debug, Error)]
pub enum MoeadError {
    /// A required file could not be opened, read or written.
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file was readable but its contents are malformed.
    #[error("{file}:{line}: {message}")]
    Parse {
        file: String,
        line: usize,
        message: String,
    },

    /// Invalid parameter combination.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The decomposition table does not match the population.
    #[error("weight table {path}: {message}")]
    WeightTable { path: PathBuf, message: String },
}

impl MoeadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MoeadError>;
