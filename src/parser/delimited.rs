//! Delimited-text adapter. Quote-aware: a quoted field may contain the
//! delimiter or newlines.

use crate::errors::ImportError;
use crate::grid::{Cell, RawGrid};

#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Read every record as a raw row; header handling happens downstream in
/// the boundary detector, so the reader itself is headerless and flexible
/// about ragged row widths.
pub fn parse(bytes: &[u8], opts: &CsvOptions) -> Result<RawGrid, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(opts.delimiter)
        .from_reader(bytes);
    let mut grid: RawGrid = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let row: Vec<Cell> = rec
            .iter()
            .map(|f| {
                if f.trim().is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(f.to_string())
                }
            })
            .collect();
        grid.push(row);
    }
    Ok(grid)
}
