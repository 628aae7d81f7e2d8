//! Page templates: custom overrides first, built-in markdown defaults second
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::documentation::config::OutputFormat;
use crate::documentation::error::{GeneratorError, GeneratorResult};
use crate::documentation::filters;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tera::{Context, Tera};
use tracing::{debug, info};

/// Kind of document a template renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Index,
    Schema,
    Class,
    Slot,
    Enum,
    Type,
    Subset,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 7] = [
        TemplateKind::Index,
        TemplateKind::Schema,
        TemplateKind::Class,
        TemplateKind::Slot,
        TemplateKind::Enum,
        TemplateKind::Type,
        TemplateKind::Subset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Index => "index",
            TemplateKind::Schema => "schema",
            TemplateKind::Class => "class",
            TemplateKind::Slot => "slot",
            TemplateKind::Enum => "enum",
            TemplateKind::Type => "type",
            TemplateKind::Subset => "subset",
        }
    }

    /// `<kind>.<suffix>.tera`
    pub fn file_name(&self, format: OutputFormat) -> String {
        format!("{}.{}.tera", self.as_str(), format.suffix())
    }

    fn builtin_markdown(&self) -> &'static str {
        match self {
            TemplateKind::Index => include_str!("../../templates/index.md.tera"),
            TemplateKind::Schema => include_str!("../../templates/schema.md.tera"),
            TemplateKind::Class => include_str!("../../templates/class.md.tera"),
            TemplateKind::Slot => include_str!("../../templates/slot.md.tera"),
            TemplateKind::Enum => include_str!("../../templates/enum.md.tera"),
            TemplateKind::Type => include_str!("../../templates/type.md.tera"),
            TemplateKind::Subset => include_str!("../../templates/subset.md.tera"),
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The templates one run needs, with filters registered
#[derive(Debug, Clone)]
pub struct TemplateSet {
    tera: Tera,
    format: OutputFormat,
}

impl TemplateSet {
    /// Resolve a template for every kind in `kinds`.
    ///
    /// Each template is looked up in `custom_dir` first; markdown falls back to
    /// the built-in defaults. Kinds left unresolved are reported together.
    pub fn load(
        format: OutputFormat,
        custom_dir: Option<&Path>,
        kinds: &[TemplateKind],
        truncate_descriptions: bool,
    ) -> GeneratorResult<Self> {
        let mut tera = match custom_dir {
            Some(dir) => load_templates_from_dir(dir)?,
            None => Tera::default(),
        };
        tera.autoescape_on(Vec::new());

        let mut missing = Vec::new();
        for kind in kinds {
            let name = kind.file_name(format);
            if tera.get_template_names().any(|n| n == name) {
                debug!(template = %name, "Using custom template");
                continue;
            }
            if format == OutputFormat::Markdown {
                if custom_dir.is_some() {
                    info!(template = %name, "Custom template not found, falling back to default");
                }
                tera.add_raw_template(&name, kind.builtin_markdown())
                    .map_err(|e| GeneratorError::render_error(name.clone(), e))?;
            } else {
                missing.push(name);
            }
        }

        if !missing.is_empty() {
            let searched = match custom_dir {
                Some(dir) => format!("{} and built-in templates", dir.display()),
                None => "built-in templates".to_string(),
            };
            return Err(GeneratorError::MissingTemplate {
                kinds: missing.join(", "),
                format: format.to_string(),
                searched,
            });
        }

        filters::register(&mut tera, truncate_descriptions);
        Ok(Self { tera, format })
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Render one document
    pub fn render(&self, kind: TemplateKind, context: &Context) -> GeneratorResult<String> {
        let name = kind.file_name(self.format);
        self.tera
            .render(&name, context)
            .map_err(|e| GeneratorError::render_error(name, e))
    }
}

/// Load all `.tera` files from a template directory, registered by file name
fn load_templates_from_dir(dir: &Path) -> GeneratorResult<Tera> {
    if !dir.is_dir() {
        return Err(GeneratorError::TemplateDirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let glob_pattern = dir.join("*.tera").to_string_lossy().to_string();
    Tera::new(&glob_pattern).map_err(|e| GeneratorError::TemplateLoad {
        path: dir.to_path_buf(),
        source: e,
    })
}
