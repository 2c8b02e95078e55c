// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a scan, a table write or a name comparison.
#[derive(Debug, Error)]
pub enum VirfeatError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed FASTA file {} at line {line}: {reason}", path.display())]
    MalformedFasta {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("CSV error on {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("column '{column}' not found in {}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("{} is not a directory", path.display())]
    NotADirectory { path: PathBuf },
}

impl VirfeatError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        VirfeatError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        VirfeatError::Csv {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, VirfeatError>;
