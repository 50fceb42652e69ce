//! Ledger errors

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Storage operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    /// Reading the current ledger
    Read,
    /// Creating the ledger directory
    CreateDir,
    /// Writing the replacement file
    Write,
    /// Swapping the replacement into place
    Replace,
}

impl fmt::Display for StorageOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageOp::Read => f.write_str("read"),
            StorageOp::CreateDir => f.write_str("create directory for"),
            StorageOp::Write => f.write_str("write"),
            StorageOp::Replace => f.write_str("replace"),
        }
    }
}

/// Ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No record carries the requested identifier
    #[error("Trade not found: {0}")]
    NotFound(String),

    /// Field cannot be changed once written
    #[error("Field is immutable: {0}")]
    ImmutableField(String),

    /// Value cannot be stored in a typed column
    #[error("Invalid value for {column}: {value:?}")]
    InvalidValue { column: String, value: String },

    /// Underlying filesystem operation failed
    #[error("Failed to {op} ledger {}: {source}", .path.display())]
    Storage {
        op: StorageOp,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV encoding or decoding failed
    #[error("Failed to {op} ledger {}: {source}", .path.display())]
    Csv {
        op: StorageOp,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A stored cell could not be parsed back
    #[error("Malformed value in trade {id:?}, column {column:?}: {value:?}")]
    Malformed {
        id: String,
        column: String,
        value: String,
    },
}

impl LedgerError {
    pub(crate) fn storage(op: StorageOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LedgerError::Storage {
            op,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(op: StorageOp, path: impl Into<PathBuf>, source: csv::Error) -> Self {
        LedgerError::Csv {
            op,
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::NotFound(_))
    }
}
