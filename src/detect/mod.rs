//! Header/data boundary detector.
//!
//! Given a raw grid, locate the header row, the first data row, and the
//! end of data, separating inventory rows from trailing footer content
//! (payment plans, terms, totals). The detector is a pure function of the
//! grid: same input, same result. It never fails — ambiguous structure
//! degrades to "first row is the header, data starts at row 1".

pub mod boundary;
pub mod rules;

use crate::grid::{self, RawGrid};

/// Tunable thresholds for the row-classification heuristics. The defaults
/// match the behavior validated against the sample corpus; treat them as
/// starting points, not contracts.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Rows scanned for the header/data-start boundary.
    pub header_scan_rows: usize,
    /// Rows (from the top) in which a vocabulary hit can mark a header.
    pub vocab_header_rows: usize,
    /// Text ratio for row 0 to count as a header on its own.
    pub header_text_ratio_row0: f64,
    /// Text ratio for a vocabulary-bearing header row.
    pub header_text_ratio_vocab: f64,
    /// Minimum numeric ratio for a row to read as data.
    pub data_numeric_ratio: f64,
    /// Consecutive near-empty rows that terminate the data region.
    pub empty_row_run: usize,
    /// Consecutive footer-vocabulary rows that terminate the data region.
    pub footer_row_run: usize,
    /// A row this many times longer than the trailing average ends data.
    pub length_spike_factor: f64,
    /// Trailing window over which the average row length is kept.
    pub trailing_window: usize,
    /// Bullet/dash-marked cells longer than this end the data region.
    pub bullet_text_len: usize,
    /// Rows with fewer populated cells than this count as near-empty.
    pub min_populated_cells: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            header_scan_rows: 10,
            vocab_header_rows: 3,
            header_text_ratio_row0: 0.8,
            header_text_ratio_vocab: 0.7,
            data_numeric_ratio: 0.2,
            empty_row_run: 2,
            footer_row_run: 2,
            length_spike_factor: 5.0,
            trailing_window: 5,
            bullet_text_len: 20,
            min_populated_cells: 2,
        }
    }
}

/// Detected boundaries. Invariants: `data_start <= data_end <= grid.len()`;
/// when a header row was found, `header_row < data_start`. `header_row` is
/// `None` only when the very first row already reads as data, in which case
/// every column header is synthesized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionResult {
    pub header_row: Option<usize>,
    pub data_start: usize,
    pub data_end: usize,
    pub column_headers: Vec<String>,
}

#[must_use]
pub fn detect(grid: &RawGrid) -> DetectionResult {
    detect_with(grid, &DetectorConfig::default())
}

#[must_use]
pub fn detect_with(grid: &RawGrid, cfg: &DetectorConfig) -> DetectionResult {
    if grid.is_empty() {
        return DetectionResult {
            header_row: None,
            data_start: 0,
            data_end: 0,
            column_headers: Vec::new(),
        };
    }

    let limit = grid.len().min(cfg.header_scan_rows);
    let mut last_header: Option<usize> = None;
    let mut first_data: Option<usize> = None;
    for (i, row) in grid.iter().enumerate().take(limit) {
        if grid::populated(row).is_empty() {
            continue;
        }
        let is_header = rules::is_header_candidate(row, i, cfg);
        let is_data = rules::is_data_candidate(row, cfg);
        if is_data && !is_header {
            first_data = Some(i);
            break;
        }
        if is_header {
            last_header = Some(i);
        }
    }

    let (header_row, data_start) = match first_data {
        Some(0) => (None, 0),
        Some(ds) => (Some(last_header.unwrap_or(ds - 1)), ds),
        // No data row found: degrade to row 0 as headers, data from row 1.
        None => (Some(0), 1.min(grid.len())),
    };

    let data_end = boundary::find_data_end(grid, data_start, cfg).max(data_start);

    let column_headers = match header_row {
        Some(h) => header_names(&grid[h]),
        None => {
            let width =
                grid[data_start..data_end].iter().map(Vec::len).max().unwrap_or(0);
            (1..=width).map(|i| format!("Column_{i}")).collect()
        }
    };

    log::debug!(
        "detect: header_row={header_row:?}, data_start={data_start}, data_end={data_end}, columns={}",
        column_headers.len()
    );
    DetectionResult { header_row, data_start, data_end, column_headers }
}

/// Trimmed header names; blank cells synthesized as `Column_{1-based}` and
/// duplicates suffixed so every header is unique.
fn header_names(row: &[crate::grid::Cell]) -> Vec<String> {
    let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();
    let mut names = Vec::with_capacity(row.len());
    for (i, cell) in row.iter().enumerate() {
        let base = cell.to_text();
        let base = if base.is_empty() { format!("Column_{}", i + 1) } else { base };
        let mut name = base.clone();
        let mut n = 2;
        while !seen.insert(name.clone()) {
            name = format!("{base}_{n}");
            n += 1;
        }
        names.push(name);
    }
    names
}
