//! Schema definition: the top-level document of a LinkML schema
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use crate::model::element::{
    ClassDefinition, EnumDefinition, SlotDefinition, SubsetDefinition, TypeDefinition,
};
use crate::model::serde_helpers::{named_map, one_or_many, prefix_map};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A schema with its element collections in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaDefinition {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(deserialize_with = "prefix_map", skip_serializing_if = "BTreeMap::is_empty")]
    pub prefixes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_range: Option<String>,
    #[serde(deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    #[serde(deserialize_with = "named_map", skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<ClassDefinition>,
    #[serde(deserialize_with = "named_map", skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<SlotDefinition>,
    #[serde(deserialize_with = "named_map", skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeDefinition>,
    #[serde(deserialize_with = "named_map", skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<EnumDefinition>,
    #[serde(deserialize_with = "named_map", skip_serializing_if = "Vec::is_empty")]
    pub subsets: Vec<SubsetDefinition>,
    /// File the schema was read from; `None` for built-in or in-memory schemas
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl SchemaDefinition {
    /// Build a schema from a parsed document.
    ///
    /// Every element without an explicit `from_schema` is stamped with the schema id
    /// so that elements keep their origin once schemas are merged.
    pub fn from_value(value: Value, path: &Path) -> LoaderResult<Self> {
        if !value.is_object() {
            return Err(LoaderError::validation_error(
                path.to_path_buf(),
                "Schema must be a mapping at the root level".to_string(),
            ));
        }

        let mut schema: SchemaDefinition = serde_json::from_value(value).map_err(|e| {
            LoaderError::validation_error(path.to_path_buf(), format!("Invalid schema: {}", e))
        })?;

        if schema.name.trim().is_empty() {
            return Err(LoaderError::validation_error(
                path.to_path_buf(),
                "Schema must declare a 'name'".to_string(),
            ));
        }
        if schema.id.trim().is_empty() {
            return Err(LoaderError::validation_error(
                path.to_path_buf(),
                "Schema must declare an 'id'".to_string(),
            ));
        }

        schema.stamp_origin();
        Ok(schema)
    }

    /// Prefix used to mint CURIEs for elements without an explicit URI
    pub fn default_prefix(&self) -> &str {
        self.default_prefix.as_deref().unwrap_or(&self.name)
    }

    fn stamp_origin(&mut self) {
        let id = self.id.clone();
        let stamp = |from_schema: &mut Option<String>| {
            if from_schema.is_none() {
                *from_schema = Some(id.clone());
            }
        };

        for class in &mut self.classes {
            stamp(&mut class.from_schema);
            for attribute in &mut class.attributes {
                stamp(&mut attribute.from_schema);
            }
        }
        for slot in &mut self.slots {
            stamp(&mut slot.from_schema);
        }
        for ty in &mut self.types {
            stamp(&mut ty.from_schema);
        }
        for e in &mut self.enums {
            stamp(&mut e.from_schema);
        }
        for subset in &mut self.subsets {
            stamp(&mut subset.from_schema);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_stamps_origin() {
        let schema = SchemaDefinition::from_value(
            json!({
                "id": "https://example.org/people",
                "name": "people",
                "classes": {
                    "Person": {"attributes": {"age": {"range": "integer"}}},
                    "Organization": null
                },
                "enums": {"Status": {"permissible_values": {"ACTIVE": null}}}
            }),
            Path::new("people.yaml"),
        )
        .unwrap();

        assert_eq!(schema.classes.len(), 2);
        assert_eq!(
            schema.classes[0].from_schema.as_deref(),
            Some("https://example.org/people")
        );
        assert_eq!(
            schema.classes[0].attributes[0].from_schema.as_deref(),
            Some("https://example.org/people")
        );
        assert_eq!(schema.enums[0].permissible_values[0].text, "ACTIVE");
        assert_eq!(schema.default_prefix(), "people");
    }

    #[test]
    fn test_from_value_requires_identity() {
        let path = Path::new("broken.yaml");
        assert!(SchemaDefinition::from_value(json!("just a string"), path).is_err());
        assert!(SchemaDefinition::from_value(json!({"id": "https://x"}), path).is_err());
        assert!(SchemaDefinition::from_value(json!({"name": "x"}), path).is_err());
    }
}
