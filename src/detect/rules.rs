//! Named row-classification predicates, one per heuristic, so each rule
//! stays independently testable and new rules can be added without
//! regressing the others.

use once_cell::sync::Lazy;
use regex::Regex;

use super::DetectorConfig;
use crate::grid::{self, Cell};

/// Words that mark a row as a plausible inventory header.
pub const HEADER_VOCAB: &[&str] = &[
    "unit", "units", "level", "floor", "tower", "block", "building", "phase", "area", "size",
    "sqft", "price", "status", "availability", "type", "bedroom", "bedrooms", "bathroom",
    "bathrooms", "view", "plot", "parking", "notes", "remarks",
];

/// Phrases that mark trailing descriptive/footer content.
pub const FOOTER_VOCAB: &[&str] = &[
    "option", "discount", "payment plan", "commission", "handover", "down payment", "terms",
    "conditions", "summary", "total", "installment", "disclaimer", "contact", "broker",
];

/// Project-name words that show up inside data rows of marketing sheets.
pub const PROJECT_KEYWORDS: &[&str] =
    &["gardens", "park", "residence", "tower", "villa", "apartment", "downtown"];

static UNIT_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2,4}-\d+$").expect("unit code pattern"));
static UNIT_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,4}$").expect("unit digits"));

/// `AB-123` style codes or bare 3-4 digit numbers read as unit numbers.
#[must_use]
pub fn matches_unit_pattern(text: &str) -> bool {
    let t = text.trim();
    UNIT_CODE.is_match(t) || UNIT_DIGITS.is_match(t)
}

/// Fraction of a row's populated cells that are non-numeric text.
#[must_use]
pub fn text_ratio(row: &[Cell]) -> f64 {
    let cells = grid::populated(row);
    if cells.is_empty() {
        return 0.0;
    }
    cells.iter().filter(|c| c.is_textual()).count() as f64 / cells.len() as f64
}

/// Any populated cell whose words contain an exact (case-insensitive)
/// header-vocabulary hit.
#[must_use]
pub fn contains_header_vocab(row: &[Cell]) -> bool {
    row.iter().filter(|c| !c.is_empty()).any(|c| {
        let text = c.to_text().to_lowercase();
        text.split(|ch: char| !ch.is_alphanumeric())
            .any(|word| HEADER_VOCAB.contains(&word))
    })
}

/// Row 0 qualifies on text ratio alone; rows near the top qualify when
/// they carry header vocabulary and are still mostly text.
#[must_use]
pub fn is_header_candidate(row: &[Cell], index: usize, cfg: &DetectorConfig) -> bool {
    let cells = grid::populated(row);
    if cells.is_empty() {
        return false;
    }
    let ratio = text_ratio(row);
    if index == 0 && ratio >= cfg.header_text_ratio_row0 {
        return true;
    }
    index < cfg.vocab_header_rows && contains_header_vocab(row) && ratio >= cfg.header_text_ratio_vocab
}

/// A populated row reads as data when enough of it is numeric, or a cell
/// looks like a unit number, or a cell carries a project-name keyword.
/// An all-text row with no unit-number match is never data, whatever else
/// it contains — those are headers or titles.
#[must_use]
pub fn is_data_candidate(row: &[Cell], cfg: &DetectorConfig) -> bool {
    let cells = grid::populated(row);
    if cells.is_empty() {
        return false;
    }
    let numeric = cells.iter().filter(|c| c.numeric_value().is_some()).count();
    let unit_match = cells.iter().any(|c| matches_unit_pattern(&c.to_text()));
    if numeric == 0 && !unit_match {
        return false;
    }
    let numeric_ratio = numeric as f64 / cells.len() as f64;
    numeric_ratio >= cfg.data_numeric_ratio
        || unit_match
        || cells.iter().any(|c| {
            let text = c.to_text().to_lowercase();
            PROJECT_KEYWORDS.iter().any(|k| text.contains(k))
        })
}

/// Fewer than `min_populated_cells` populated cells.
#[must_use]
pub fn is_near_empty(row: &[Cell], cfg: &DetectorConfig) -> bool {
    grid::populated(row).len() < cfg.min_populated_cells
}

/// Any populated cell containing a footer-vocabulary phrase.
#[must_use]
pub fn is_footer_row(row: &[Cell]) -> bool {
    row.iter().filter(|c| !c.is_empty()).any(|c| {
        let text = c.to_text().to_lowercase();
        FOOTER_VOCAB.iter().any(|k| text.contains(k))
    })
}

/// Long bullet/dash/asterisk-formatted text marks descriptive content.
#[must_use]
pub fn has_long_bullet_text(row: &[Cell], cfg: &DetectorConfig) -> bool {
    row.iter().any(|c| {
        let text = c.to_text();
        let t = text.trim_start();
        (t.starts_with('-') || t.starts_with('*') || t.starts_with('\u{2022}'))
            && text.chars().count() > cfg.bullet_text_len
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Cell {
        Cell::Text(s.into())
    }

    fn cfg() -> DetectorConfig {
        DetectorConfig::default()
    }

    #[test]
    fn unit_patterns() {
        assert!(matches_unit_pattern("A-101"));
        assert!(matches_unit_pattern("TWR-12"));
        assert!(matches_unit_pattern("1203"));
        assert!(!matches_unit_pattern("12"));
        assert!(!matches_unit_pattern("12345"));
        assert!(!matches_unit_pattern("Penthouse"));
    }

    #[test]
    fn header_vocab_matches_whole_words_only() {
        assert!(contains_header_vocab(&[t("Unit No")]));
        assert!(contains_header_vocab(&[t("PRICE (AED)")]));
        assert!(!contains_header_vocab(&[t("unitary pricing")]));
    }

    #[test]
    fn row0_title_is_header_candidate() {
        assert!(is_header_candidate(&[t("Marina Gardens Phase 1")], 0, &cfg()));
    }

    #[test]
    fn vocab_row_within_first_three_is_header_candidate() {
        let row = vec![t("Unit No"), t("Floor"), t("Area"), t("Price")];
        assert!(is_header_candidate(&row, 1, &cfg()));
        assert!(is_header_candidate(&row, 2, &cfg()));
        assert!(!is_header_candidate(&row, 3, &cfg()));
    }

    #[test]
    fn numeric_rows_are_data_not_header() {
        let row = vec![t("A-101"), Cell::Number(3.0), Cell::Number(850.0), t("250,000")];
        assert!(is_data_candidate(&row, &cfg()));
        assert!(!is_header_candidate(&row, 2, &cfg()));
    }

    #[test]
    fn all_text_row_is_never_data() {
        let row = vec![t("Spacious layouts"), t("with garden views")];
        assert!(!is_data_candidate(&row, &cfg()));
    }

    #[test]
    fn unit_code_alone_marks_data() {
        let row = vec![t("B-1404"), t("Sea view"), t("Sold")];
        assert!(is_data_candidate(&row, &cfg()));
    }

    #[test]
    fn footer_and_bullet_rows() {
        assert!(is_footer_row(&[t("Payment Plan: 60/40 on handover")]));
        assert!(!is_footer_row(&[t("A-101"), t("850")]));
        assert!(has_long_bullet_text(&[t("- flexible payment terms available on request")], &cfg()));
        assert!(!has_long_bullet_text(&[t("- A1")], &cfg()));
    }

    #[test]
    fn near_empty_rows() {
        assert!(is_near_empty(&[Cell::Empty, Cell::Empty], &cfg()));
        assert!(is_near_empty(&[t("x")], &cfg()));
        assert!(!is_near_empty(&[t("x"), t("y")], &cfg()));
    }
}
