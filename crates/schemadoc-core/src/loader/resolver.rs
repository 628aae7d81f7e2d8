//! Import resolution
//!
//! Maps the entries of a schema's `imports` list to a concrete source:
//! - `linkml:`-prefixed imports resolve to schemas embedded in the crate
//! - Everything else is a path relative to the importing schema, with
//!   `.yaml` appended when no extension is given
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use crate::model::LINKML_TYPES_YAML;
use std::path::{Path, PathBuf};

/// Where an import comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSource {
    /// A schema shipped with the crate
    Builtin {
        name: &'static str,
        content: &'static str,
    },
    /// A schema file on disk
    File(PathBuf),
}

impl ImportSource {
    /// Key used to load each schema of the closure once
    pub fn key(&self) -> String {
        match self {
            ImportSource::Builtin { name, .. } => format!("builtin:{}", name),
            ImportSource::File(path) => path.display().to_string(),
        }
    }

    /// Path used in diagnostics
    pub fn display_path(&self) -> PathBuf {
        match self {
            ImportSource::Builtin { name, .. } => PathBuf::from(format!("<builtin:{}>", name)),
            ImportSource::File(path) => path.clone(),
        }
    }
}

/// Tracks the chain of schemas currently being imported
#[derive(Debug, Clone)]
pub struct ResolverContext {
    /// Stack of schemas currently being loaded
    pub import_stack: Vec<PathBuf>,
    /// Maximum import nesting
    pub max_depth: usize,
}

impl ResolverContext {
    pub fn new(max_depth: usize) -> Self {
        Self {
            import_stack: Vec::new(),
            max_depth,
        }
    }

    /// Push a schema onto the import stack
    pub fn push_path(&mut self, path: PathBuf) -> LoaderResult<()> {
        if self.import_stack.len() >= self.max_depth {
            let mut chain = self.import_stack.clone();
            chain.push(path);
            return Err(LoaderError::depth_exceeded(self.max_depth, &chain));
        }
        self.import_stack.push(path);
        Ok(())
    }

    /// Pop a schema from the import stack
    pub fn pop_path(&mut self) -> Option<PathBuf> {
        self.import_stack.pop()
    }

    pub fn depth(&self) -> usize {
        self.import_stack.len()
    }
}

/// File suffixes an import reference may already carry
const SCHEMA_SUFFIXES: [&str; 3] = [".yaml", ".yml", ".json"];

/// Resolves import references against the importing schema's location
#[derive(Debug, Default)]
pub struct ImportResolver;

impl ImportResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve one import reference.
    ///
    /// `base_dir` is the directory of the importing schema, `source_path` is used
    /// for error reporting only.
    pub fn resolve(
        &self,
        reference: &str,
        base_dir: &Path,
        source_path: &Path,
    ) -> LoaderResult<ImportSource> {
        if let Some(name) = reference.strip_prefix("linkml:") {
            return match name {
                "types" => Ok(ImportSource::Builtin {
                    name: "types",
                    content: LINKML_TYPES_YAML,
                }),
                other => Err(LoaderError::reference_error(
                    reference.to_string(),
                    source_path.to_path_buf(),
                    format!("no built-in LinkML schema named '{}'", other),
                )),
            };
        }

        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Err(LoaderError::reference_error(
                reference.to_string(),
                source_path.to_path_buf(),
                "remote imports are not fetched; download the schema and import it by path"
                    .to_string(),
            ));
        }

        let candidate = if SCHEMA_SUFFIXES.iter().any(|suffix| reference.ends_with(suffix)) {
            base_dir.join(reference)
        } else {
            base_dir.join(format!("{}.yaml", reference))
        };

        if !candidate.is_file() {
            return Err(LoaderError::reference_error(
                reference.to_string(),
                source_path.to_path_buf(),
                format!("file not found: {}", candidate.display()),
            ));
        }

        let canonical = candidate
            .canonicalize()
            .map_err(|e| LoaderError::io_error(candidate.clone(), e))?;
        Ok(ImportSource::File(canonical))
    }
}
