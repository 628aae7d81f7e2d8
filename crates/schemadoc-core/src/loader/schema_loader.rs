//! Main schema loader: reads a schema and its imports closure
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::loader::{
    error::{LoaderError, LoaderResult},
    parser::{Format, SchemaParser},
    resolver::{ImportResolver, ImportSource, ResolverContext},
};
use crate::model::SchemaDefinition;
use crate::view::SchemaView;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for schema loader behavior
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Maximum import nesting depth
    pub max_import_depth: usize,
    /// Whether to follow `imports` at all
    pub load_imports: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_import_depth: 10,
            load_imports: true,
        }
    }
}

/// Loads schemas from disk or memory into a [`SchemaView`]
#[derive(Debug, Default)]
pub struct SchemaLoader {
    config: LoaderConfig,
    parser: SchemaParser,
    resolver: ImportResolver,
}

/// Accumulated state while walking the imports closure
struct ClosureState {
    context: ResolverContext,
    seen: HashSet<String>,
    imported: Vec<SchemaDefinition>,
}

impl SchemaLoader {
    /// Create a new schema loader with default configuration
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    /// Create a new schema loader with custom configuration
    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            config,
            parser: SchemaParser::new(),
            resolver: ImportResolver::new(),
        }
    }

    /// Load a schema file and its imports closure
    pub fn load(&self, path: &Path) -> LoaderResult<SchemaView> {
        let canonical = path
            .canonicalize()
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;
        let value = self.parser.parse_file(&canonical)?;
        let mut root = SchemaDefinition::from_value(value, path)?;
        root.source = Some(canonical.clone());

        let base_dir = canonical
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let root_source = ImportSource::File(canonical);
        self.load_closure(root, &root_source, &base_dir)
    }

    /// Load a schema held in memory; relative imports resolve against `base_dir`
    pub fn load_str(&self, content: &str, format: Format, base_dir: &Path) -> LoaderResult<SchemaView> {
        let pseudo_path = base_dir.join(format!("<memory>.{}", format.primary_extension()));
        let value = self.parser.parse_content(content, format, &pseudo_path)?;
        let root = SchemaDefinition::from_value(value, &pseudo_path)?;
        let root_source = ImportSource::File(pseudo_path);
        self.load_closure(root, &root_source, base_dir)
    }

    fn load_closure(
        &self,
        root: SchemaDefinition,
        root_source: &ImportSource,
        base_dir: &Path,
    ) -> LoaderResult<SchemaView> {
        let mut state = ClosureState {
            context: ResolverContext::new(self.config.max_import_depth),
            seen: HashSet::from([root_source.key()]),
            imported: Vec::new(),
        };

        if self.config.load_imports {
            state.context.push_path(root_source.display_path())?;
            self.load_imports(&root, base_dir, &mut state)?;
            state.context.pop_path();
        }

        debug!(
            schema = %root.name,
            imports = state.imported.len(),
            "Loaded schema closure"
        );
        Ok(SchemaView::new(root, state.imported))
    }

    /// Depth-first walk; a schema is appended after everything it imports
    fn load_imports(
        &self,
        schema: &SchemaDefinition,
        base_dir: &Path,
        state: &mut ClosureState,
    ) -> LoaderResult<()> {
        let source_path = state
            .context
            .import_stack
            .last()
            .cloned()
            .unwrap_or_default();

        for reference in &schema.imports {
            let source = self.resolver.resolve(reference, base_dir, &source_path)?;
            if !state.seen.insert(source.key()) {
                continue;
            }

            let (imported, imported_dir) = self.read_source(&source)?;
            debug!(
                import = %reference,
                schema = %imported.name,
                depth = state.context.depth(),
                "Resolved import"
            );

            state.context.push_path(source.display_path())?;
            self.load_imports(&imported, &imported_dir, state)?;
            state.context.pop_path();

            state.imported.push(imported);
        }

        Ok(())
    }

    fn read_source(&self, source: &ImportSource) -> LoaderResult<(SchemaDefinition, PathBuf)> {
        match source {
            ImportSource::Builtin { content, .. } => {
                let path = source.display_path();
                let value = self.parser.parse_yaml(content, &path)?;
                Ok((SchemaDefinition::from_value(value, &path)?, PathBuf::from(".")))
            }
            ImportSource::File(path) => {
                let value = self.parser.parse_file(path)?;
                let mut schema = SchemaDefinition::from_value(value, path)?;
                schema.source = Some(path.clone());
                let dir = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."));
                Ok((schema, dir))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_with_builtin_types() {
        let loader = SchemaLoader::new();
        let view = loader
            .load_str(
                "id: https://example.org/people\nname: people\nimports:\n  - linkml:types\n",
                Format::Yaml,
                Path::new("."),
            )
            .unwrap();

        assert_eq!(view.imports_closure(), vec!["types", "people"]);
        assert!(view.get_type("string").is_some());
    }

    #[test]
    fn test_cyclic_imports_load_once() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("a.yaml"),
            "id: https://example.org/a\nname: a\nimports: [b]\nclasses:\n  A:\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("b.yaml"),
            "id: https://example.org/b\nname: b\nimports: [a, c]\nclasses:\n  B:\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("c.yaml"),
            "id: https://example.org/c\nname: c\nclasses:\n  C:\n",
        )
        .unwrap();

        let view = SchemaLoader::new().load(&dir.path().join("a.yaml")).unwrap();
        assert_eq!(view.imports_closure(), vec!["c", "b", "a"]);
        assert_eq!(view.all_classes(true).len(), 3);
        assert_eq!(view.all_classes(false).len(), 1);
    }

    #[test]
    fn test_depth_limit() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.yaml"), "id: r\nname: root\nimports: [one]\n").unwrap();
        fs::write(dir.path().join("one.yaml"), "id: o\nname: one\nimports: [two]\n").unwrap();
        fs::write(dir.path().join("two.yaml"), "id: t\nname: two\n").unwrap();

        let loader = SchemaLoader::with_config(LoaderConfig {
            max_import_depth: 2,
            load_imports: true,
        });
        let err = loader.load(&dir.path().join("root.yaml")).unwrap_err();
        assert!(matches!(err, LoaderError::DepthExceeded { .. }));
    }

    #[test]
    fn test_missing_import_reports_source() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("root.yaml");
        fs::write(&root, "id: r\nname: root\nimports: [nowhere]\n").unwrap();

        let err = SchemaLoader::new().load(&root).unwrap_err();
        match err {
            LoaderError::ReferenceError { reference, .. } => assert_eq!(reference, "nowhere"),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
