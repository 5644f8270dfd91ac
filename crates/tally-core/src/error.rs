//! Error types for tally core.

use thiserror::Error;

use tally_engine::engine::InvalidReference;

/// Errors that can occur while loading, saving or addressing a sheet.
/// Per-cell formula problems are values, not errors; see `EvalError`.
#[derive(Error, Debug)]
pub enum TallyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

impl From<InvalidReference> for TallyError {
    fn from(err: InvalidReference) -> Self {
        TallyError::InvalidRange(err.0)
    }
}

pub type Result<T> = std::result::Result<T, TallyError>;
