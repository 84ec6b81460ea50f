//! Display configuration: the per-column rendering schema consumed by
//! table UIs, derived either fresh from detected headers or from stored
//! state (active manifest, else the attribute bags of stored records).

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::store::{Scope, UnitStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Number,
    Currency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDisplay {
    /// Original column header, exact spreadsheet casing.
    pub source: String,
    pub label: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

/// Currency when the header mentions price or discount, number for
/// area/size, text otherwise.
#[must_use]
pub fn infer_type(header: &str) -> ColumnType {
    let h = header.to_lowercase();
    if h.contains("price") || h.contains("discount") {
        ColumnType::Currency
    } else if h.contains("area") || h.contains("size") {
        ColumnType::Number
    } else {
        ColumnType::Text
    }
}

/// Underscores to spaces, each word title-cased.
#[must_use]
pub fn prettify(header: &str) -> String {
    header
        .replace('_', " ")
        .split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One entry per detected column, order-preserving.
#[must_use]
pub fn from_headers(headers: &[String]) -> Vec<ColumnDisplay> {
    headers
        .iter()
        .map(|h| ColumnDisplay {
            source: h.clone(),
            label: prettify(h),
            column_type: infer_type(h),
        })
        .collect()
}

/// Re-derive the display configuration for a project from stored state:
/// the active manifest's persisted config when one exists, otherwise the
/// first-seen union of `custom_fields` keys across stored records. Pure
/// read, no side effects.
pub fn for_project(store: &dyn UnitStore, scope: &Scope) -> Result<Vec<ColumnDisplay>, StoreError> {
    if let Some(manifest) = store.active_manifest(scope)? {
        return Ok(manifest.column_mapping.display_config);
    }
    let mut seen = std::collections::HashSet::new();
    let mut headers: Vec<String> = Vec::new();
    for record in store.list_units(scope)? {
        for key in record.custom_fields.keys() {
            if seen.insert(key.clone()) {
                headers.push(key.clone());
            }
        }
    }
    Ok(from_headers(&headers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_inference_follows_header_names() {
        assert_eq!(infer_type("Price (AED)"), ColumnType::Currency);
        assert_eq!(infer_type("Early-bird DISCOUNT"), ColumnType::Currency);
        assert_eq!(infer_type("Area SqFt"), ColumnType::Number);
        assert_eq!(infer_type("Plot Size"), ColumnType::Number);
        assert_eq!(infer_type("Unit No"), ColumnType::Text);
    }

    #[test]
    fn labels_are_prettified() {
        assert_eq!(prettify("unit_number"), "Unit Number");
        assert_eq!(prettify("floor"), "Floor");
        assert_eq!(prettify("Price AED"), "Price AED");
    }

    #[test]
    fn header_order_is_preserved() {
        let headers = vec!["Unit No".to_string(), "Area".to_string(), "Price".to_string()];
        let cfg = from_headers(&headers);
        assert_eq!(cfg.len(), 3);
        assert_eq!(cfg[0].source, "Unit No");
        assert_eq!(cfg[1].column_type, ColumnType::Number);
        assert_eq!(cfg[2].column_type, ColumnType::Currency);
    }
}
