use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::detect::DetectorConfig;
use crate::parser::CsvOptions;

/// How incoming records reconcile with the existing set. Mutually
/// exclusive per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStrategy {
    /// Delete everything in scope, then insert the batch.
    Replace,
    /// Update by `unit_number`, insert the rest.
    Merge,
    /// Insert everything, disambiguating colliding unit numbers.
    Append,
}

impl fmt::Display for ImportStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImportStrategy::Replace => "replace",
            ImportStrategy::Merge => "merge",
            ImportStrategy::Append => "append",
        })
    }
}

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub csv: CsvOptions,
    pub detector: DetectorConfig,
    /// Log progress every N rows during execution.
    pub progress_every: Option<usize>,
    /// When set, row-level errors are also appended to this NDJSON file.
    pub error_sidecar: Option<PathBuf>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            csv: CsvOptions::default(),
            detector: DetectorConfig::default(),
            progress_every: Some(1000),
            error_sidecar: None,
        }
    }
}

/// One row-level failure, ordered as encountered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// Zero-based index within the data region.
    pub row: usize,
    pub unit_number: String,
    pub message: String,
}
