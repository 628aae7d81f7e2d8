//! End-to-end documentation generation
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use proptest::prelude::*;
use schemadoc_core::documentation::{camelcase, underscore};
use schemadoc_core::{DocGenerator, GeneratorConfig, GeneratorError, OutputFormat};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const MINIMAL: &str = r#"
id: https://example.org/minimal
name: minimal
title: Minimal Schema
description: One root class and one subclass
classes:
  Root:
    description: The root class
  Child:
    is_a: Root
    description: A subclass of the root
"#;

const WITH_TYPES: &str = r#"
id: https://example.org/library
name: library
imports:
  - linkml:types
default_range: string
classes:
  Book:
    attributes:
      title:
        required: true
      pages:
        range: integer
        minimum_value: 1
"#;

const CHAIN: &str = r#"
id: https://example.org/chain
name: chain
classes:
  Grandparent:
  Parent:
    is_a: Grandparent
  Focus:
    is_a: Parent
  Leaf:
    is_a: Focus
"#;

fn write_schema(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("schema.yaml");
    fs::write(&path, content).unwrap();
    path
}

fn generate(content: &str, configure: impl FnOnce(&mut GeneratorConfig)) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_schema(&dir, content);
    let out = dir.path().join("docs");
    let mut config = GeneratorConfig::new(&out);
    configure(&mut config);
    DocGenerator::from_path(&schema, config)
        .unwrap()
        .serialize()
        .unwrap();
    (dir, out)
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn test_root_and_subclass_end_to_end() {
    let (_dir, out) = generate(MINIMAL, |_| {});

    // one page per class, the schema page and the index
    assert_eq!(files_in(&out), vec!["Child.md", "Root.md", "index.md", "minimal.md"]);

    let child = fs::read_to_string(out.join("Child.md")).unwrap();
    assert!(child.starts_with("# Class: Child"));
    assert!(child.contains("* [Root](Root.md)\n    * **Child**"));

    let index = fs::read_to_string(out.join("index.md")).unwrap();
    assert!(index.starts_with("# Minimal Schema"));
    assert!(index.contains("| [Child](Child.md) | A subclass of the root |"));
    assert!(index.contains("| [Root](Root.md) | The root class |"));
}

#[test]
fn test_subfolder_layout() {
    let (_dir, out) = generate(MINIMAL, |config| config.subfolder_type_separation = true);

    assert_eq!(files_in(&out), vec!["classes", "index.md", "schemas"]);
    assert_eq!(files_in(&out.join("classes")), vec!["Child.md", "Root.md"]);
    assert_eq!(files_in(&out.join("schemas")), vec!["minimal.md"]);

    let child = fs::read_to_string(out.join("classes/Child.md")).unwrap();
    assert!(child.contains("[Root](../classes/Root.md)"));
    let index = fs::read_to_string(out.join("index.md")).unwrap();
    assert!(index.contains("[Root](classes/Root.md)"));
}

#[test]
fn test_missing_template_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_schema(&dir, MINIMAL);
    let out = dir.path().join("docs");
    let config = GeneratorConfig {
        format: OutputFormat::Html,
        ..GeneratorConfig::new(&out)
    };

    let err = DocGenerator::from_path(&schema, config)
        .unwrap()
        .serialize()
        .unwrap_err();
    assert!(matches!(err, GeneratorError::MissingTemplate { .. }));
    assert!(err.is_config_error());
    assert!(!out.exists());
}

#[test]
fn test_unwritable_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_schema(&dir, MINIMAL);
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();

    let err = DocGenerator::from_path(&schema, GeneratorConfig::new(blocker.join("docs")))
        .unwrap()
        .serialize()
        .unwrap_err();
    assert!(matches!(err, GeneratorError::Io { .. }));
}

#[test]
fn test_builtin_types_link_externally() {
    let (_dir, out) = generate(WITH_TYPES, |_| {});

    let files = files_in(&out);
    assert!(files.contains(&"Book.md".to_string()));
    assert!(files.contains(&"types.md".to_string()));
    assert!(!files.contains(&"String.md".to_string()));

    let book = fs::read_to_string(out.join("Book.md")).unwrap();
    assert!(book.contains("[xsd:string](http://www.w3.org/2001/XMLSchema#string)"));
    assert!(book.contains("[xsd:integer](http://www.w3.org/2001/XMLSchema#integer)"));
    assert!(book.contains("| [title](title.md) | 1 <br/>"));

    let pages = fs::read_to_string(out.join("pages.md")).unwrap();
    assert!(pages.contains("* Value range: >= 1"));
}

#[test]
fn test_three_level_chain_with_child() {
    let (_dir, out) = generate(CHAIN, |_| {});
    let focus = fs::read_to_string(out.join("Focus.md")).unwrap();
    assert!(focus.contains(
        "* [Grandparent](Grandparent.md)\n    * [Parent](Parent.md)\n        * **Focus**\n            * [Leaf](Leaf.md)\n"
    ));
}

#[test]
fn test_custom_template_directory() {
    let dir = tempfile::tempdir().unwrap();
    let templates = dir.path().join("templates");
    fs::create_dir(&templates).unwrap();
    fs::write(templates.join("class.md.tera"), "{{ page.name }} in {{ settings.schema_title }}").unwrap();

    let (_out_dir, out) = generate(MINIMAL, |config| config.template_directory = Some(templates));
    assert_eq!(fs::read_to_string(out.join("Root.md")).unwrap(), "Root in Minimal Schema");
    assert!(fs::read_to_string(out.join("index.md")).unwrap().starts_with("# Minimal Schema"));
}

const LAB: &str = r#"
id: https://example.org/lab
name: lab
classes:
  HasTimestamp:
    mixin: true
    attributes:
      recorded_at:
  Measurement:
    mixins: [HasTimestamp]
    attributes:
      value:
    rules:
      - title: value_needs_timestamp
        preconditions:
          slot_conditions:
            value:
              required: true
"#;

#[test]
fn test_class_page_sections_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_schema(&dir, LAB);
    let examples = dir.path().join("examples");
    fs::create_dir(&examples).unwrap();
    fs::write(examples.join("Measurement-001.yaml"), "value: 3\n").unwrap();

    let out = dir.path().join("docs");
    let config = GeneratorConfig {
        example_directory: Some(examples),
        ..GeneratorConfig::new(&out)
    };
    DocGenerator::from_path(&schema, config)
        .unwrap()
        .serialize()
        .unwrap();

    let page = fs::read_to_string(out.join("Measurement.md")).unwrap();
    assert!(page.contains("### Mixed in from [HasTimestamp](HasTimestamp.md)\n\n* [recorded_at](recorded_at.md)\n"));
    assert!(page.contains("## Rules\n"));
    assert!(page.contains(r#"| value_needs_timestamp | `{"slot_conditions":{"value":{"required":true}}}` |  |  |"#));
    assert!(page.contains("## Examples\n\n### Example: Measurement-001\n\n```yaml\nvalue: 3\n```\n"));

    let mixin = fs::read_to_string(out.join("HasTimestamp.md")).unwrap();
    assert!(!mixin.contains("## Rules"));
    assert!(!mixin.contains("## Examples"));
}

#[test]
fn test_missing_example_directory_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_schema(&dir, LAB);
    let out = dir.path().join("docs");
    let config = GeneratorConfig {
        example_directory: Some(dir.path().join("absent")),
        ..GeneratorConfig::new(&out)
    };

    let err = DocGenerator::from_path(&schema, config)
        .unwrap()
        .serialize()
        .unwrap_err();
    assert!(matches!(err, GeneratorError::ExampleDirectoryNotFound { .. }));
    assert!(!out.exists());
}

proptest! {
    #[test]
    fn prop_names_are_idempotent(text in "[A-Za-z0-9 _.-]{0,24}") {
        let camel = camelcase(&text);
        prop_assert_eq!(camelcase(&camel), camel.clone());
        let snake = underscore(&text);
        prop_assert_eq!(underscore(&snake), snake.clone());
    }
}
