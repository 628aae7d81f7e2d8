//! Batch driver: plans one document per element and renders them in order
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::documentation::config::GeneratorConfig;
use crate::documentation::error::{GeneratorError, GeneratorResult};
use crate::documentation::templates::{TemplateKind, TemplateSet};
use crate::loader::SchemaLoader;
use crate::model::{Element, ElementKind};
use crate::view::SchemaView;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tera::Context;
use tracing::{debug, info, instrument};

/// Output folder for schema pages when pages are separated by kind
pub const SCHEMA_SUBFOLDER: &str = "schemas";

/// Documentation generator over a loaded schema
#[derive(Debug, Clone)]
pub struct DocGenerator {
    pub(crate) view: SchemaView,
    pub(crate) config: GeneratorConfig,
}

/// What a planned document describes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "subject", rename_all = "snake_case")]
pub enum DocumentSubject {
    Index,
    Schema { name: String },
    Element { kind: ElementKind, name: String },
}

/// One document the run will write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedDocument {
    pub template: TemplateKind,
    pub subject: DocumentSubject,
    /// Path relative to the output directory
    pub path: PathBuf,
}

/// An element left out because it belongs to an external schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedElement {
    pub kind: ElementKind,
    pub name: String,
}

/// Every document of a run, in write order
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentPlan {
    pub documents: Vec<PlannedDocument>,
    pub skipped: Vec<SkippedElement>,
}

impl DocumentPlan {
    /// Template kinds the planned documents render with
    pub fn template_kinds(&self) -> Vec<TemplateKind> {
        TemplateKind::ALL
            .into_iter()
            .filter(|kind| self.documents.iter().any(|d| d.template == *kind))
            .collect()
    }
}

/// Outcome of [`DocGenerator::serialize`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    /// Written files, absolute or relative to the working directory as configured
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedElement>,
}

fn template_for(kind: ElementKind) -> TemplateKind {
    match kind {
        ElementKind::Class => TemplateKind::Class,
        ElementKind::Slot => TemplateKind::Slot,
        ElementKind::Type => TemplateKind::Type,
        ElementKind::Enum => TemplateKind::Enum,
        ElementKind::Subset => TemplateKind::Subset,
    }
}

impl DocGenerator {
    pub fn new(view: SchemaView, config: GeneratorConfig) -> Self {
        Self { view, config }
    }

    /// Load a schema with its imports and build a generator for it
    pub fn from_path(path: impl AsRef<Path>, config: GeneratorConfig) -> GeneratorResult<Self> {
        let view = SchemaLoader::new().load(path.as_ref())?;
        Ok(Self::new(view, config))
    }

    pub fn view(&self) -> &SchemaView {
        &self.view
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.config.format.suffix())
    }

    fn folder(&self, subfolder: &str) -> PathBuf {
        if self.config.subfolder_type_separation {
            PathBuf::from(subfolder)
        } else {
            PathBuf::new()
        }
    }

    /// Decide every document the run writes without touching the filesystem.
    ///
    /// The index comes first. Single-file formats stop there; otherwise
    /// schemas of the imports closure follow, then classes, slots, enums,
    /// types and subsets.
    pub fn plan(&self) -> DocumentPlan {
        let mut plan = DocumentPlan::default();
        plan.documents.push(PlannedDocument {
            template: TemplateKind::Index,
            subject: DocumentSubject::Index,
            path: PathBuf::from(self.file_name(&self.config.index_name)),
        });

        if self.config.format.is_single_file() {
            return plan;
        }

        for name in self.view.imports_closure() {
            plan.documents.push(PlannedDocument {
                template: TemplateKind::Schema,
                subject: DocumentSubject::Schema {
                    name: name.to_string(),
                },
                path: self.folder(SCHEMA_SUBFOLDER).join(self.file_name(name)),
            });
        }

        for kind in ElementKind::ALL {
            for element in self.view.all_elements(kind, true) {
                if !self.has_page(&element) {
                    plan.skipped.push(SkippedElement {
                        kind,
                        name: element.name().to_string(),
                    });
                    continue;
                }
                plan.documents.push(PlannedDocument {
                    template: template_for(kind),
                    subject: DocumentSubject::Element {
                        kind,
                        name: element.name().to_string(),
                    },
                    path: self
                        .folder(kind.subfolder())
                        .join(self.file_name(&self.name(&element))),
                });
            }
        }
        plan
    }

    /// Render and write every planned document.
    ///
    /// Configuration and templates are checked before anything is written.
    /// The first rendering or I/O failure aborts the run; files already
    /// written stay in place.
    #[instrument(skip(self), fields(schema = %self.view.schema().name))]
    pub fn serialize(&self) -> GeneratorResult<GenerationReport> {
        self.config.validate()?;
        let directory = self
            .config
            .directory
            .as_deref()
            .ok_or(GeneratorError::MissingDirectory)?;

        let plan = self.plan();
        let templates = TemplateSet::load(
            self.config.format,
            self.config.template_directory.as_deref(),
            &plan.template_kinds(),
            self.config.truncate_descriptions,
        )?;

        fs::create_dir_all(directory)
            .map_err(|e| GeneratorError::io_error(directory.to_path_buf(), e))?;

        let settings = self.render_settings();
        let mut written = Vec::with_capacity(plan.documents.len());
        let mut current = None;
        for document in &plan.documents {
            if current != Some(document.template) {
                info!(collection = %document.template, "Processing documents");
                current = Some(document.template);
            }

            let mut context = Context::new();
            context.insert("settings", &settings);
            self.insert_page(&mut context, &document.subject)?;
            let rendered = templates.render(document.template, &context)?;

            let path = directory.join(&document.path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| GeneratorError::io_error(parent.to_path_buf(), e))?;
            }
            fs::write(&path, rendered).map_err(|e| GeneratorError::io_error(path.clone(), e))?;
            debug!(path = %path.display(), "Wrote document");
            written.push(path);
        }

        if self.config.format.is_single_file() {
            info!(format = %self.config.format, "Single-file format, element pages skipped");
        }
        info!(documents = written.len(), skipped = plan.skipped.len(), "Documentation generated");

        Ok(GenerationReport {
            written,
            skipped: plan.skipped,
        })
    }

    /// Build the page for a subject and store it as `page`
    fn insert_page(&self, context: &mut Context, subject: &DocumentSubject) -> GeneratorResult<()> {
        match subject {
            DocumentSubject::Index => context.insert("page", &self.index_page()),
            DocumentSubject::Schema { name } => {
                if let Some(schema) = self.view.schema_map().get(name.as_str()) {
                    context.insert("page", &self.schema_page(schema));
                }
            }
            DocumentSubject::Element { kind, name } => match self.view.get_element_of_kind(*kind, name) {
                Some(Element::Class(class)) => context.insert("page", &self.class_page(class)?),
                Some(Element::Slot(_)) => {
                    if let Some(slot) = self.view.induced_slot(name, None) {
                        context.insert("page", &self.slot_page(&slot)?);
                    }
                }
                Some(Element::Enum(e)) => context.insert("page", &self.enum_page(e)?),
                Some(Element::Type(ty)) => {
                    let induced = self.view.induced_type(name).unwrap_or_else(|| ty.clone());
                    context.insert("page", &self.type_page(&induced)?);
                }
                Some(Element::Subset(subset)) => {
                    context.insert("page", &self.subset_page(subset)?)
                }
                None => {}
            },
        }
        Ok(())
    }
}
