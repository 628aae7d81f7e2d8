//! Schema parsing functionality for YAML and JSON formats
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::Value;
use std::path::Path;

/// Supported file formats for schema parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
        }
    }

    /// Get the primary file extension for this format
    pub fn primary_extension(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }
}

/// Schema parser with support for multiple formats
#[derive(Debug, Default)]
pub struct SchemaParser;

impl SchemaParser {
    /// Create a new schema parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a schema file, detecting format from extension
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        self.parse_content(&content, format, path)
    }

    /// Parse schema content with explicit format
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json => self.parse_json(content, path),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        // First parse as YAML Value to catch YAML-specific errors
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;

        // Mapping order survives the conversion because serde_json preserves insertion order
        serde_json::to_value(yaml_value)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        serde_json::from_str(content)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(Path::new("test.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("test.YML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("test.json")).unwrap(), Format::Json);

        assert!(Format::from_path(Path::new("test.txt")).is_err());
        assert!(Format::from_path(Path::new("test")).is_err());
    }

    #[test]
    fn test_yaml_parsing_keeps_key_order() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("schema.yaml");

        let yaml_content = r#"
id: https://example.org/test
name: test
classes:
  Zebra:
  Aardvark:
  Mongoose:
"#;
        fs::write(&file_path, yaml_content).unwrap();

        let parser = SchemaParser::new();
        let result = parser.parse_file(&file_path)?;

        assert_eq!(result["name"], "test");
        let keys: Vec<_> = result["classes"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["Zebra", "Aardvark", "Mongoose"]);

        Ok(())
    }

    #[test]
    fn test_json_parsing() -> LoaderResult<()> {
        let parser = SchemaParser::new();
        let value = parser.parse_content(
            r#"{"id": "https://example.org/test", "name": "test"}"#,
            Format::Json,
            Path::new("schema.json"),
        )?;
        assert_eq!(value["id"], "https://example.org/test");
        Ok(())
    }

    #[test]
    fn test_parse_errors_carry_path() {
        let parser = SchemaParser::new();
        let err = parser
            .parse_content("classes: [unclosed", Format::Yaml, Path::new("bad.yaml"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::YamlParseError { .. }));
        assert_eq!(err.path().unwrap(), Path::new("bad.yaml"));
    }
}
