//! Cardinality and value-range formatting
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::model::SlotDefinition;
use serde_json::Number;

/// Cardinality in mermaid multiplicity notation: `0..1`, `*`, `0..n`, `1`, `1..*`, `1..n`, `n..*`, `n..m`.
///
/// `exact_cardinality` wins over everything; `required` or `identifier` force a
/// minimum of 1 and `multivalued` forces an unbounded maximum. Recommended
/// slots get a trailing ` _recommended_`.
pub fn cardinality(slot: &SlotDefinition) -> String {
    let mut rendered = match slot.exact_cardinality {
        Some(exact) => exact.to_string(),
        None => {
            let min = if slot.is_required() || slot.is_identifier() {
                "1".to_string()
            } else {
                slot.minimum_cardinality.unwrap_or(0).to_string()
            };
            let max = if slot.is_multivalued() {
                "*".to_string()
            } else {
                slot.maximum_cardinality.unwrap_or(1).to_string()
            };

            match (min.as_str(), max.as_str()) {
                ("0", "1") => "0..1".to_string(),
                ("0", "*") => "*".to_string(),
                ("1", "1") => "1".to_string(),
                _ => format!("{}..{}", min, max),
            }
        }
    };

    if slot.is_recommended() {
        rendered.push_str(" _recommended_");
    }
    rendered
}

/// `a to b`, `>= a` or `<= b` for a slot with numeric bounds
pub fn number_value_range(slot: &SlotDefinition) -> Option<String> {
    value_range(slot.minimum_value.as_ref(), slot.maximum_value.as_ref())
}

pub fn value_range(minimum: Option<&Number>, maximum: Option<&Number>) -> Option<String> {
    match (minimum, maximum) {
        (Some(min), Some(max)) => Some(format!("{} to {}", min, max)),
        (Some(min), None) => Some(format!(">= {}", min)),
        (None, Some(max)) => Some(format!("<= {}", max)),
        (None, None) => None,
    }
}
