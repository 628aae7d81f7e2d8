//! Class rules in a tabular form
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::model::{ClassDefinition, ClassRule};
use serde::Serialize;
use serde_json::Value;

/// A class rule with its conditions rendered as compact JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleRow {
    pub title: String,
    pub description: Option<String>,
    pub preconditions: Option<String>,
    pub postconditions: Option<String>,
    pub elseconditions: Option<String>,
    pub deactivated: bool,
}

/// Drop `name` entries that only repeat an element's name.
///
/// A `name` key holding an object is a condition on a slot called `name` and stays.
pub fn remove_name_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(k, v)| !(k.as_str() == "name" && v.is_string()))
                .map(|(k, v)| (k.clone(), remove_name_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(remove_name_keys).collect()),
        other => other.clone(),
    }
}

fn condition(value: Option<&Value>) -> Option<String> {
    value
        .filter(|v| !v.is_null())
        .map(|v| remove_name_keys(v).to_string())
}

impl From<&ClassRule> for RuleRow {
    fn from(rule: &ClassRule) -> Self {
        Self {
            title: rule.title.clone().unwrap_or_default(),
            description: rule.description.clone(),
            preconditions: condition(rule.preconditions.as_ref()),
            postconditions: condition(rule.postconditions.as_ref()),
            elseconditions: condition(rule.elseconditions.as_ref()),
            deactivated: rule.deactivated,
        }
    }
}

/// Rows for every rule asserted on a class
pub fn class_rules(class: &ClassDefinition) -> Vec<RuleRow> {
    class.rules.iter().map(RuleRow::from).collect()
}
