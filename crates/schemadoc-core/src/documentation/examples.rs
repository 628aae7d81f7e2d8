//! Example data files shown on class pages
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::documentation::error::{GeneratorError, GeneratorResult};
use crate::documentation::generator::DocGenerator;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One example instance of a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleBlob {
    /// File stem, e.g. `Person-001`
    pub name: String,
    /// Fence language of the content
    pub format: &'static str,
    pub content: String,
}

fn example_format(path: &Path) -> Option<&'static str> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Some("yaml"),
        Some("json") => Some("json"),
        _ => None,
    }
}

/// Files in `dir` named `<class>-<label>.<yaml|yml|json>`, sorted by file name
pub fn example_files(dir: &Path, class_name: &str) -> GeneratorResult<Vec<PathBuf>> {
    let prefix = format!("{}-", class_name);
    let entries = fs::read_dir(dir).map_err(|e| GeneratorError::Read {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| GeneratorError::Read {
                path: dir.to_path_buf(),
                source: e,
            })?
            .path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(&prefix));
        if matches && path.is_file() && example_format(&path).is_some() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

impl DocGenerator {
    /// Example files for a class; empty when no example directory is configured
    pub fn example_object_blobs(&self, class_name: &str) -> GeneratorResult<Vec<ExampleBlob>> {
        let Some(dir) = self.config.example_directory.as_deref() else {
            return Ok(Vec::new());
        };

        let mut blobs = Vec::new();
        for path in example_files(dir, class_name)? {
            let content = fs::read_to_string(&path).map_err(|e| GeneratorError::Read {
                path: path.clone(),
                source: e,
            })?;
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            blobs.push(ExampleBlob {
                name,
                format: example_format(&path).unwrap_or("yaml"),
                content,
            });
        }
        debug!(class = class_name, examples = blobs.len(), "Collected examples");
        Ok(blobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documentation::GeneratorConfig;
    use crate::loader::{Format, SchemaLoader};

    const SCHEMA: &str = "id: https://example.org/zoo\nname: zoo\nclasses:\n  Dog:\n  DogHouse:\n";

    fn docgen(example_directory: Option<PathBuf>) -> DocGenerator {
        let view = SchemaLoader::new()
            .load_str(SCHEMA, Format::Yaml, Path::new("."))
            .unwrap();
        DocGenerator::new(
            view,
            GeneratorConfig {
                example_directory,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_examples_match_class_prefix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Dog-002.json"), "{\"name\": \"Rex\"}").unwrap();
        fs::write(dir.path().join("Dog-001.yaml"), "name: Fido\n").unwrap();
        fs::write(dir.path().join("DogHouse-001.yaml"), "size: small\n").unwrap();
        fs::write(dir.path().join("Dog-notes.txt"), "ignored").unwrap();

        let blobs = docgen(Some(dir.path().to_path_buf()))
            .example_object_blobs("Dog")
            .unwrap();
        assert_eq!(
            blobs,
            vec![
                ExampleBlob {
                    name: "Dog-001".to_string(),
                    format: "yaml",
                    content: "name: Fido\n".to_string(),
                },
                ExampleBlob {
                    name: "Dog-002".to_string(),
                    format: "json",
                    content: "{\"name\": \"Rex\"}".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_no_example_directory() {
        assert!(docgen(None).example_object_blobs("Dog").unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_directory_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = docgen(Some(dir.path().join("absent")))
            .example_object_blobs("Dog")
            .unwrap_err();
        assert!(matches!(err, GeneratorError::Read { .. }));
    }
}
