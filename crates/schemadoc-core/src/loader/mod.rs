//! Schema loading and import resolution
//!
//! This module provides schema loading capabilities including:
//! - YAML and JSON parsing with declaration order preserved
//! - Import resolution, with `linkml:types` served from an embedded copy
//! - Import depth limiting and cycle tolerance
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use schemadoc_core::loader::SchemaLoader;
//! use std::path::Path;
//!
//! let loader = SchemaLoader::new();
//! let view = loader.load(Path::new("personinfo.yaml"))?;
//! println!("Loaded {} classes", view.all_classes(true).len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;
pub mod resolver;
pub mod schema_loader;

pub use error::{LoaderError, LoaderResult};
pub use parser::{Format, SchemaParser};
pub use resolver::{ImportResolver, ImportSource, ResolverContext};
pub use schema_loader::{LoaderConfig, SchemaLoader};
