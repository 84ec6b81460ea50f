use thiserror::Error;

use crate::import::ImportStrategy;

/// Errors surfaced by `UnitStore`/`FileStore` implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported file format: {0} (accepted formats: .csv, .xlsx, .xls)")]
    UnsupportedFormat(String),

    #[error("file contained no rows")]
    EmptyFile,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("workbook error: {0}")]
    Workbook(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("{strategy} import failed after {completed} rows: {source}")]
    Execution {
        strategy: ImportStrategy,
        completed: usize,
        #[source]
        source: StoreError,
    },
}
