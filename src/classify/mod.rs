//! Column classifier & record builder: map detected headers onto
//! recognized attributes via the synonym table and turn every data row
//! into exactly one `UnitRecord`. Extraction failures degrade individual
//! attributes, never the row.

pub mod display;
pub mod synonyms;
pub mod values;

use crate::detect::DetectionResult;
use crate::grid::{Cell, RawGrid};
use crate::record::{FieldValue, UnitRecord, UnitStatus};
use display::ColumnDisplay;
use synonyms::{Concept, ColumnMap};

#[derive(Debug, Clone)]
pub struct Classified {
    pub records: Vec<UnitRecord>,
    pub display_config: Vec<ColumnDisplay>,
}

#[must_use]
pub fn build(grid: &RawGrid, detection: &DetectionResult) -> Classified {
    let columns = synonyms::resolve_columns(&detection.column_headers);
    let mut records = Vec::with_capacity(detection.data_end - detection.data_start);
    for (ordinal, idx) in (detection.data_start..detection.data_end).enumerate() {
        records.push(build_record(&grid[idx], &detection.column_headers, &columns, ordinal));
    }
    let display_config = display::from_headers(&detection.column_headers);
    log::info!(
        "classify: {} records from rows {}..{}, {} recognized columns",
        records.len(),
        detection.data_start,
        detection.data_end,
        columns.len()
    );
    Classified { records, display_config }
}

fn cell_at<'a>(row: &'a [Cell], columns: &ColumnMap, concept: Concept) -> Option<&'a Cell> {
    columns.get(&concept).and_then(|i| row.get(*i)).filter(|c| !c.is_empty())
}

fn text_at(row: &[Cell], columns: &ColumnMap, concept: Concept) -> Option<String> {
    cell_at(row, columns, concept).map(Cell::to_text).filter(|t| !t.is_empty())
}

/// `ordinal` is the zero-based position within the data region; it seeds
/// the synthesized `UNIT-{n}` fallback so unit numbers stay unique and
/// stable for a given file.
fn build_record(
    row: &[Cell],
    headers: &[String],
    columns: &ColumnMap,
    ordinal: usize,
) -> UnitRecord {
    let unit_number = text_at(row, columns, Concept::UnitNumber)
        .unwrap_or_else(|| format!("UNIT-{}", ordinal + 1));
    let mut record = UnitRecord::new(unit_number);

    // The attribute bag keeps every populated cell, promoted or not.
    for (i, cell) in row.iter().enumerate() {
        if cell.is_empty() {
            continue;
        }
        let header = headers
            .get(i)
            .cloned()
            .unwrap_or_else(|| format!("Column_{}", i + 1));
        let value = match cell {
            Cell::Text(s) => FieldValue::Text(s.trim().to_string()),
            Cell::Number(n) => FieldValue::Number(*n),
            Cell::Bool(b) => FieldValue::Bool(*b),
            Cell::Empty => continue,
        };
        record.custom_fields.insert(header, value);
    }

    record.unit_type = text_at(row, columns, Concept::UnitType);
    record.notes = text_at(row, columns, Concept::Notes);

    if let Some(cell) = cell_at(row, columns, Concept::Floor) {
        record.floor_number = values::parse_int(cell).and_then(|n| i32::try_from(n).ok());
        if record.floor_number.is_none() {
            log::debug!("floor value {:?} not numeric for {}", cell, record.unit_number);
        }
    }
    if let Some(cell) = cell_at(row, columns, Concept::Area) {
        record.area_sqft = values::parse_positive(cell);
    }
    if let Some(cell) = cell_at(row, columns, Concept::Price) {
        record.price = values::parse_positive(cell);
        if record.price.is_none() {
            log::debug!("price value {:?} unusable for {}", cell, record.unit_number);
        }
    }
    if let Some(cell) = cell_at(row, columns, Concept::Bathrooms) {
        record.bathrooms = values::parse_count(cell);
    }

    // Bedrooms: dedicated column first, then the unit-type text
    // ("2 BEDROOM", "Studio").
    record.bedrooms = cell_at(row, columns, Concept::Bedrooms)
        .and_then(|c| values::parse_bedrooms(&c.to_text()))
        .or_else(|| record.unit_type.as_deref().and_then(values::parse_bedrooms));

    if let Some(text) = text_at(row, columns, Concept::Status) {
        if let Some(status) = UnitStatus::parse(&text) {
            record.status = status;
        } else {
            log::debug!("unrecognized status {:?} for {}", text, record.unit_number);
        }
    }

    record
}
