//! Semi-structured unit record: fixed recognized attributes plus a
//! free-form attribute bag retaining every original column.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Value stored in the free-form attribute bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl FieldValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    #[default]
    Available,
    Held,
    Sold,
    Reserved,
}

impl UnitStatus {
    /// Lenient parse of spreadsheet status text; `None` when unrecognized.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let t = text.trim().to_lowercase();
        if t.is_empty() {
            return None;
        }
        if t.contains("sold") {
            Some(UnitStatus::Sold)
        } else if t.contains("reserv") || t.contains("book") {
            Some(UnitStatus::Reserved)
        } else if t.contains("hold") || t.contains("held") || t.contains("blocked") {
            Some(UnitStatus::Held)
        } else if t.contains("avail") || t == "open" || t == "free" {
            Some(UnitStatus::Available)
        } else {
            None
        }
    }
}

/// One inventory unit. `unit_number` is always non-empty; every other
/// recognized attribute degrades to `None` on failed extraction. The
/// original row survives intact in `custom_fields`, including values that
/// were also promoted to a recognized attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub id: Uuid,
    pub unit_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub status: UnitStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub custom_fields: BTreeMap<String, FieldValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UnitRecord {
    #[must_use]
    pub fn new(unit_number: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            unit_number: unit_number.into(),
            unit_type: None,
            floor_number: None,
            area_sqft: None,
            bedrooms: None,
            bathrooms: None,
            price: None,
            status: UnitStatus::default(),
            notes: None,
            custom_fields: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_is_lenient() {
        assert_eq!(UnitStatus::parse("SOLD OUT"), Some(UnitStatus::Sold));
        assert_eq!(UnitStatus::parse("Reserved"), Some(UnitStatus::Reserved));
        assert_eq!(UnitStatus::parse("on hold"), Some(UnitStatus::Held));
        assert_eq!(UnitStatus::parse("Available"), Some(UnitStatus::Available));
        assert_eq!(UnitStatus::parse("???"), None);
        assert_eq!(UnitStatus::parse(""), None);
    }

    #[test]
    fn new_record_defaults_to_available() {
        let r = UnitRecord::new("A-101");
        assert_eq!(r.status, UnitStatus::Available);
        assert!(r.custom_fields.is_empty());
    }
}
