//! End-of-data detection: walk forward from the first data row and stop
//! where the inventory gives way to blank space or footer prose.

use super::{rules, DetectorConfig};
use crate::grid::{self, RawGrid};

/// Index one past the last data row. Stops at the first of:
/// a run of near-empty rows, a run of footer-vocabulary rows, a row whose
/// joined text length spikes past the trailing average, or a long
/// bullet-formatted cell. Otherwise data runs to the end of the grid.
#[must_use]
pub fn find_data_end(grid: &RawGrid, data_start: usize, cfg: &DetectorConfig) -> usize {
    let mut window: Vec<usize> = Vec::new();
    let mut i = data_start;
    while i < grid.len() {
        let row = &grid[i];

        if rules::is_near_empty(row, cfg) {
            if run_of(grid, i, cfg.empty_row_run, |r| rules::is_near_empty(r, cfg)) {
                return i;
            }
            // a lone sparse row stays inside the data region
            i += 1;
            continue;
        }

        if rules::is_footer_row(row)
            && run_of(grid, i, cfg.footer_row_run, rules::is_footer_row)
        {
            return i;
        }

        if rules::has_long_bullet_text(row, cfg) {
            return i;
        }

        let len = grid::joined_text_len(row);
        if !window.is_empty() {
            let avg = window.iter().sum::<usize>() as f64 / window.len() as f64;
            if avg > 0.0 && len as f64 > cfg.length_spike_factor * avg {
                return i;
            }
        }
        window.push(len);
        if window.len() > cfg.trailing_window {
            window.remove(0);
        }
        i += 1;
    }
    grid.len()
}

/// `count` consecutive rows starting at `start` all satisfying `pred`.
fn run_of<F>(grid: &RawGrid, start: usize, count: usize, pred: F) -> bool
where
    F: Fn(&[crate::grid::Cell]) -> bool,
{
    if start + count > grid.len() {
        return false;
    }
    grid[start..start + count].iter().all(|r| pred(r))
}
