//! Fuzzy column-name resolution.
//!
//! Headers are normalized (lowercased, punctuation stripped) and matched
//! in three passes of decreasing strictness: exact synonym equality, the
//! "unit" + "number/no/id/code" compound, then substring containment.
//! Each header binds to at most one concept and vice versa; resolution
//! order is significant and mirrors the pass structure.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Concept {
    UnitNumber,
    UnitType,
    Floor,
    Area,
    Price,
    Bedrooms,
    Bathrooms,
    Status,
    Parking,
    Notes,
}

pub type ColumnMap = HashMap<Concept, usize>;

/// (concept, exact synonyms, containment synonyms), in resolution order.
/// Bathrooms precede bedrooms so "bath" never eats a bedroom column;
/// unit-type precedes the loose unit-number containment for the same
/// reason.
const TABLE: &[(Concept, &[&str], &[&str])] = &[
    (
        Concept::UnitNumber,
        &[
            "unit number", "unit no", "unit", "unit id", "unit code", "apartment no", "apt no",
            "villa no", "flat no", "plot no", "house no",
        ],
        &[],
    ),
    (Concept::Floor, &["floor", "floor number", "floor no", "level", "storey"], &["floor", "level", "storey"]),
    (
        Concept::Area,
        &["area", "area sqft", "size", "size sqft", "saleable area", "built up area", "bua"],
        &["area", "size", "sqft", "sq ft"],
    ),
    (Concept::Price, &["price", "total price", "price aed", "amount", "value"], &["price", "amount"]),
    (
        Concept::Bathrooms,
        &["bathrooms", "bathroom", "baths", "no of bathrooms", "toilets"],
        &["bath", "toilet", "wc"],
    ),
    (
        Concept::Bedrooms,
        &["bedrooms", "bedroom", "beds", "br", "no of bedrooms"],
        &["bedroom", "beds"],
    ),
    (
        Concept::UnitType,
        &["unit type", "type", "category", "unit category", "configuration"],
        &["type", "category", "config"],
    ),
    (Concept::Status, &["status", "availability", "unit status"], &["status", "availab"]),
    (Concept::Parking, &["parking", "parking slots", "car parks"], &["parking"]),
    (Concept::Notes, &["notes", "remarks", "comments", "description"], &["note", "remark", "comment"]),
];

/// Loose fallback containment for the unit-number concept, applied last.
const UNIT_NUMBER_LOOSE: &[&str] = &["unit", "apartment", "apt", "villa", "flat", "plot"];

#[must_use]
pub fn normalize(header: &str) -> String {
    let mut out = String::with_capacity(header.len());
    for ch in header.to_lowercase().chars() {
        if ch.is_alphanumeric() {
            out.push(ch);
        } else if !out.ends_with(' ') {
            out.push(' ');
        }
    }
    out.trim().to_string()
}

#[must_use]
pub fn resolve_columns(headers: &[String]) -> ColumnMap {
    let norm: Vec<String> = headers.iter().map(|h| normalize(h)).collect();
    let mut map: ColumnMap = HashMap::new();
    let mut taken = vec![false; headers.len()];

    let mut bind = |map: &mut ColumnMap, taken: &mut Vec<bool>, concept: Concept, idx: usize| {
        map.insert(concept, idx);
        taken[idx] = true;
    };

    // exact pass
    for (concept, exact, _) in TABLE {
        if map.contains_key(concept) {
            continue;
        }
        'syn: for syn in *exact {
            for (i, h) in norm.iter().enumerate() {
                if !taken[i] && h == syn {
                    bind(&mut map, &mut taken, *concept, i);
                    break 'syn;
                }
            }
        }
    }

    // "unit" + qualifier compound, word-level so "unit notes" stays out
    if !map.contains_key(&Concept::UnitNumber) {
        for (i, h) in norm.iter().enumerate() {
            if taken[i] {
                continue;
            }
            let words: Vec<&str> = h.split_whitespace().collect();
            if words.contains(&"unit")
                && words.iter().any(|w| matches!(*w, "no" | "number" | "num" | "id" | "code"))
            {
                bind(&mut map, &mut taken, Concept::UnitNumber, i);
                break;
            }
        }
    }

    // containment pass
    for (concept, _, partial) in TABLE {
        if map.contains_key(concept) {
            continue;
        }
        'part: for syn in *partial {
            for (i, h) in norm.iter().enumerate() {
                if !taken[i] && h.contains(syn) {
                    bind(&mut map, &mut taken, *concept, i);
                    break 'part;
                }
            }
        }
    }

    // loosest unit-number fallback
    if !map.contains_key(&Concept::UnitNumber) {
        'loose: for syn in UNIT_NUMBER_LOOSE {
            for (i, h) in norm.iter().enumerate() {
                if !taken[i] && h.contains(syn) {
                    bind(&mut map, &mut taken, Concept::UnitNumber, i);
                    break 'loose;
                }
            }
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(headers: &[&str]) -> ColumnMap {
        resolve_columns(&headers.iter().map(|s| (*s).to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn normalization_strips_punctuation() {
        assert_eq!(normalize("Unit No."), "unit no");
        assert_eq!(normalize("PRICE (AED)"), "price aed");
        assert_eq!(normalize("  Area / SqFt "), "area sqft");
    }

    #[test]
    fn exact_matches_win() {
        let map = resolve(&["Unit No", "Floor", "Area", "Price"]);
        assert_eq!(map[&Concept::UnitNumber], 0);
        assert_eq!(map[&Concept::Floor], 1);
        assert_eq!(map[&Concept::Area], 2);
        assert_eq!(map[&Concept::Price], 3);
    }

    #[test]
    fn unit_type_does_not_steal_unit_number() {
        let map = resolve(&["Unit Type", "Unit Number", "Status"]);
        assert_eq!(map[&Concept::UnitNumber], 1);
        assert_eq!(map[&Concept::UnitType], 0);
        assert_eq!(map[&Concept::Status], 2);
    }

    #[test]
    fn compound_rule_is_word_based() {
        let map = resolve(&["Unit Notes", "Unit #"]);
        // "unit notes" must not read as a unit-number column
        assert_eq!(map.get(&Concept::UnitNumber), Some(&1));
        assert_eq!(map.get(&Concept::Notes), Some(&0));
    }

    #[test]
    fn containment_fallbacks() {
        let map = resolve(&["Apartment", "Saleable Area (sqft)", "Total Price AED", "Availability"]);
        assert_eq!(map.get(&Concept::UnitNumber), Some(&0));
        assert_eq!(map.get(&Concept::Area), Some(&1));
        assert_eq!(map.get(&Concept::Price), Some(&2));
        assert_eq!(map.get(&Concept::Status), Some(&3));
    }

    #[test]
    fn bathrooms_and_bedrooms_do_not_collide() {
        let map = resolve(&["Bedrooms", "Bathrooms"]);
        assert_eq!(map.get(&Concept::Bedrooms), Some(&0));
        assert_eq!(map.get(&Concept::Bathrooms), Some(&1));
    }

    #[test]
    fn unrecognized_headers_stay_unbound() {
        let map = resolve(&["View", "Orientation"]);
        assert!(map.is_empty());
    }
}
