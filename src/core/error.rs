//! Error types shared by the store, the estimator and persistence

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Why an order suggestion could not be computed
///
/// None of these mutate the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NotComputable {
    #[error("no record exists for {0}")]
    NoRecord(NaiveDate),

    #[error("no earlier record to compare {0} against")]
    NoPreviousRecord(NaiveDate),

    #[error("the previous record ({0}) has no order quantity")]
    MissingPreviousOrder(NaiveDate),

    #[error("the record for {0} has no stock quantity")]
    MissingStock(NaiveDate),

    #[error("no days elapsed between the two records")]
    ZeroElapsed,

    #[error("the computed quantity is not a finite number")]
    NonFinite,
}

/// Errors reading or writing the persisted blob
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),

    #[error("Failed to encode data: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors returned by store and workbook operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Item not found: {0}")]
    UnknownItem(String),

    #[error("Cannot compute order: {0}")]
    NotComputable(#[from] NotComputable),

    #[error(transparent)]
    Persistence(#[from] PersistError),
}

impl StoreError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        StoreError::InvalidInput(reason.into())
    }
}
