//! Tabular parser: bytes in, `RawGrid` out.
//!
//! Two format adapters feed the one grid shape: a quote-aware delimited
//! reader and a first-sheet workbook reader. Pure transformation, no side
//! effects beyond logging.

pub mod delimited;
pub mod workbook;

pub use delimited::CsvOptions;

use crate::errors::ImportError;
use crate::grid::RawGrid;
use crate::source::{self, SourceFile, SourceFormat};

/// Parse a source file into a grid with default CSV options.
///
/// # Errors
/// `UnsupportedFormat` for unrecognized files, `EmptyFile` when zero rows
/// are produced, plus adapter-specific parse errors.
pub fn parse_source(file: &SourceFile) -> Result<RawGrid, ImportError> {
    parse_source_with(file, &CsvOptions::default())
}

pub fn parse_source_with(file: &SourceFile, csv: &CsvOptions) -> Result<RawGrid, ImportError> {
    let format = source::detect_format(file)?;
    log::info!("parse: file={}, format={:?}, bytes={}", file.name, format, file.bytes.len());
    let grid = match format {
        SourceFormat::Delimited => delimited::parse(&file.bytes, csv)?,
        SourceFormat::Workbook => workbook::parse(&file.bytes)?,
    };
    if grid.is_empty() {
        return Err(ImportError::EmptyFile);
    }
    Ok(grid)
}
