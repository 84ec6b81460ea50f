//! Untyped 2-D grid produced by the tabular parser.
//!
//! A `RawGrid` preserves the source row order exactly; every downstream
//! component (boundary detector, column classifier) indexes into it and
//! never mutates it.

use serde::{Deserialize, Serialize};

/// One parsed cell. Workbook cells arrive typed; delimited-text cells
/// arrive as `Text`. Blank cells are normalized to `Empty`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

pub type RawGrid = Vec<Vec<Cell>>;

impl Cell {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Trimmed textual form, empty for `Empty`. Whole-valued floats render
    /// without the trailing `.0` so workbook numbers match their CSV twins.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Cell::Bool(b) => b.to_string(),
        }
    }

    /// Numeric interpretation: typed numbers pass through; text is parsed
    /// after stripping thousands separators.
    #[must_use]
    pub fn numeric_value(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => crate::classify::values::parse_number(s),
            _ => None,
        }
    }

    /// A cell is textual when it carries text that does not read as a number.
    #[must_use]
    pub fn is_textual(&self) -> bool {
        matches!(self, Cell::Text(_)) && self.numeric_value().is_none()
    }
}

/// Non-empty cells of a row.
pub fn populated(row: &[Cell]) -> Vec<&Cell> {
    row.iter().filter(|c| !c.is_empty()).collect()
}

/// Joined textual length of a row, used by the end-of-data length-spike rule.
#[must_use]
pub fn joined_text_len(row: &[Cell]) -> usize {
    row.iter().map(|c| c.to_text().chars().count()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_counts_as_empty() {
        assert!(Cell::Text("   ".into()).is_empty());
        assert!(Cell::Empty.is_empty());
        assert!(!Cell::Number(0.0).is_empty());
    }

    #[test]
    fn whole_floats_render_without_fraction() {
        assert_eq!(Cell::Number(850.0).to_text(), "850");
        assert_eq!(Cell::Number(2.5).to_text(), "2.5");
    }

    #[test]
    fn numeric_value_strips_separators() {
        assert_eq!(Cell::Text("1,250,000".into()).numeric_value(), Some(1_250_000.0));
        assert_eq!(Cell::Text("tower".into()).numeric_value(), None);
    }
}
