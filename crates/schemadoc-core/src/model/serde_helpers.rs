//! Deserialization helpers for the loosely-typed parts of LinkML YAML
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Elements that are keyed by name in their parent mapping
pub trait Named {
    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);
}

/// Accept either a single string or a list of strings
pub fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(vec![s]),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Ok(other.to_string()),
            })
            .collect(),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or a list of strings, found {}",
            other
        ))),
    }
}

/// A list that may be written as `null`
pub fn list_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a `name -> definition` mapping into an ordered list.
///
/// A `null` value yields a default definition carrying only its name;
/// a list of definitions is also accepted as long as each entry has a name.
pub fn named_map<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default + Named,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Object(map)) => from_object(map).map_err(D::Error::custom),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| {
                let element: T = serde_json::from_value(item).map_err(D::Error::custom)?;
                if element.name().is_empty() {
                    return Err(D::Error::custom("list entries must declare a name"));
                }
                Ok(element)
            })
            .collect(),
        Some(other) => Err(D::Error::custom(format!(
            "expected a mapping of named definitions, found {}",
            other
        ))),
    }
}

fn from_object<T>(map: Map<String, Value>) -> Result<Vec<T>, serde_json::Error>
where
    T: DeserializeOwned + Default + Named,
{
    let mut elements = Vec::with_capacity(map.len());
    for (key, value) in map {
        let mut element: T = match value {
            Value::Null => T::default(),
            Value::String(description) => {
                // `Person: some text` is shorthand used by a few schemas for a description
                let mut object = Map::new();
                object.insert("description".to_string(), Value::String(description));
                serde_json::from_value(Value::Object(object))?
            }
            other => serde_json::from_value(other)?,
        };
        if element.name().is_empty() {
            element.set_name(key);
        }
        elements.push(element);
    }
    Ok(elements)
}

/// Prefix declarations come either as `prefix: uri` or as
/// `prefix: {prefix_prefix: .., prefix_reference: ..}`.
pub fn prefix_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let map = match value {
        None | Some(Value::Null) => return Ok(BTreeMap::new()),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(D::Error::custom(format!(
                "expected a prefix mapping, found {}",
                other
            )))
        }
    };

    let mut prefixes = BTreeMap::new();
    for (key, value) in map {
        let reference = match value {
            Value::String(reference) => reference,
            Value::Object(object) => object
                .get("prefix_reference")
                .and_then(|r| r.as_str())
                .map(String::from)
                .ok_or_else(|| {
                    D::Error::custom(format!("prefix '{}' is missing prefix_reference", key))
                })?,
            other => {
                return Err(D::Error::custom(format!(
                    "invalid expansion for prefix '{}': {}",
                    key, other
                )))
            }
        };
        prefixes.insert(key, reference);
    }
    Ok(prefixes)
}
