//! End-to-end wiring: file → parse → detect boundaries → classify →
//! preview, and preview → execute. The preview stage is side-effect
//! free; nothing touches the store until the caller confirms a strategy.

use std::path::Path;

use serde::Serialize;

use crate::classify::{self, display::ColumnDisplay};
use crate::detect;
use crate::errors::ImportError;
use crate::import::options::{ImportOptions, RowError};
use crate::parser;
use crate::record::UnitRecord;
use crate::source::SourceFile;

/// Pre-import confirmation payload for the UI: the full record set, the
/// derived table schema, and row counts.
#[derive(Debug, Clone, Serialize)]
pub struct ImportPreview {
    pub columns: Vec<String>,
    pub sample_data: Vec<UnitRecord>,
    pub total_rows: usize,
    pub valid_rows: usize,
    pub errors: Vec<RowError>,
    pub display_config: Vec<ColumnDisplay>,
}

/// Run the read-only half of the pipeline.
///
/// # Errors
/// `UnsupportedFormat`, `EmptyFile`, and adapter parse errors. Detection
/// and classification never fail; a row that yields nothing usable still
/// produces a record and a preview-level `RowError`.
pub fn preview_source(
    file: &SourceFile,
    opts: &ImportOptions,
) -> Result<ImportPreview, ImportError> {
    let grid = parser::parse_source_with(file, &opts.csv)?;
    let detection = detect::detect_with(&grid, &opts.detector);
    let classified = classify::build(&grid, &detection);

    let total_rows = classified.records.len();
    let mut errors = Vec::new();
    let mut valid_rows = 0usize;
    for (row, record) in classified.records.iter().enumerate() {
        if record.custom_fields.is_empty() {
            errors.push(RowError {
                row,
                unit_number: record.unit_number.clone(),
                message: "row contained no values".to_string(),
            });
        } else {
            valid_rows += 1;
        }
    }

    Ok(ImportPreview {
        columns: detection.column_headers,
        sample_data: classified.records,
        total_rows,
        valid_rows,
        errors,
        display_config: classified.display_config,
    })
}

/// Convenience wrapper over `preview_source` for on-disk files.
pub fn preview_path(path: impl AsRef<Path>, opts: &ImportOptions) -> Result<ImportPreview, ImportError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    preview_source(&SourceFile::new(name, bytes), opts)
}
