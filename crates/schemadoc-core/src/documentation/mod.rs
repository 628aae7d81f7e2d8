//! Documentation generation for LinkML schemas
//!
//! A [`DocGenerator`] plans one page per schema element, builds a render-ready
//! page model for each and renders it through Tera templates. Built-in
//! markdown templates ship with the crate; other formats need a template
//! directory.
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

pub mod cardinality;
pub mod config;
pub mod context;
pub mod diagram;
pub mod error;
pub mod examples;
pub mod filters;
pub mod generator;
pub mod hierarchy;
pub mod links;
pub mod naming;
pub mod rules;
pub mod templates;

pub use cardinality::{cardinality, number_value_range};
pub use config::{DiagramType, GeneratorConfig, MarkdownDialect, OutputFormat, SortBy};
pub use context::{
    ClassPage, ElementRow, EnumPage, IndexPage, MixinSlots, RenderSettings, SchemaPage, SlotPage,
    SlotRow, SubsetPage, TypePage,
};
pub use diagram::{DiagramRenderer, MermaidClassDiagram, MermaidErDiagram, PlantUmlClassDiagram};
pub use error::{GeneratorError, GeneratorResult};
pub use examples::ExampleBlob;
pub use generator::{
    DocGenerator, DocumentPlan, DocumentSubject, GenerationReport, PlannedDocument, SkippedElement,
};
pub use hierarchy::HierarchyNode;
pub use links::{markdown_link, LinkTarget};
pub use naming::{camelcase, underscore};
pub use rules::RuleRow;
pub use templates::{TemplateKind, TemplateSet};
