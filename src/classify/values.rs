//! Typed value extraction from raw cell text. Failures always return
//! `None`; the caller keeps the raw value in the attribute bag and moves
//! on (skip-with-log, never fail the row).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::grid::Cell;

/// Locale-agnostic numeric parse with thousands separators stripped.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned = text.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Whole-valued numbers only; `3.0` reads as `3`, `3.5` as nothing.
#[must_use]
pub fn parse_int(cell: &Cell) -> Option<i64> {
    let n = cell.numeric_value()?;
    if n.fract() == 0.0 && n.abs() < 1e15 {
        Some(n as i64)
    } else {
        None
    }
}

/// Non-negative whole count (bedrooms, bathrooms).
#[must_use]
pub fn parse_count(cell: &Cell) -> Option<u32> {
    parse_int(cell).and_then(|n| u32::try_from(n).ok())
}

/// Strictly positive measure (area, price).
#[must_use]
pub fn parse_positive(cell: &Cell) -> Option<f64> {
    cell.numeric_value().filter(|n| *n > 0.0)
}

static BEDROOMS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)[\s-]*(?:bed(?:room)?s?|br)\b").expect("bedrooms pattern"));
static STUDIO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bstudio\b").expect("studio pattern"));

/// Bedroom count from free text: `2 BEDROOM`, `3-Bed`, `1BR`, `Studio`
/// (zero), or a bare integer.
#[must_use]
pub fn parse_bedrooms(text: &str) -> Option<u32> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    if STUDIO.is_match(t) {
        return Some(0);
    }
    if let Some(caps) = BEDROOMS.captures(t) {
        return caps[1].parse().ok();
    }
    parse_number(t).and_then(|n| {
        if n.fract() == 0.0 && n >= 0.0 {
            u32::try_from(n as i64).ok()
        } else {
            None
        }
    })
}
