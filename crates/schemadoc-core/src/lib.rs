//! Schemadoc Core - documentation sites from LinkML schemas
//!
//! This crate loads a LinkML schema together with its imports, answers
//! inheritance and induction queries over the merged closure, and renders
//! one page per class, slot, enum, type and subset plus an index.
//!
//! # Main Components
//!
//! - **Model**: Serde mirror of the LinkML metamodel subset the generator reads
//! - **Loader**: YAML/JSON parsing and import resolution
//! - **View**: Ancestry, induced slots and URI resolution over the closure
//! - **Documentation**: Naming, linking, hierarchy trees, diagrams and the batch driver
//!
//! # Example
//!
//! ```no_run
//! use schemadoc_core::{DocGenerator, GeneratorConfig};
//!
//! fn example() -> schemadoc_core::GeneratorResult<()> {
//!     let config = GeneratorConfig::new("docs");
//!     let generator = DocGenerator::from_path("personinfo.yaml", config)?;
//!     let report = generator.serialize()?;
//!     println!("wrote {} documents", report.written.len());
//!     Ok(())
//! }
//! ```
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

pub mod documentation;
pub mod loader;
pub mod model;
pub mod view;

pub use documentation::{
    DiagramType, DocGenerator, GenerationReport, GeneratorConfig, GeneratorError,
    GeneratorResult, OutputFormat, SortBy,
};
pub use loader::{LoaderConfig, LoaderError, LoaderResult, SchemaLoader};
pub use model::{Element, ElementKind, SchemaDefinition};
pub use view::SchemaView;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
