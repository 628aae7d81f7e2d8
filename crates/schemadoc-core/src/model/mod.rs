//! Schema object model
//!
//! A plain-data mirror of the parts of the LinkML metamodel that documentation
//! generation reads. Definitions keep their declaration order, and element maps
//! accept the `Name:` (null) shorthand.
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

pub mod element;
pub mod schema;
pub mod serde_helpers;

pub use element::{
    ClassDefinition, ClassRule, Element, ElementKind, EnumDefinition, PermissibleValue, SlotDefinition,
    SubsetDefinition, TypeDefinition,
};
pub use schema::SchemaDefinition;

/// Identifier of the built-in LinkML types schema
pub const LINKML_TYPES_ID: &str = "https://w3id.org/linkml/types";

/// Namespace shared by all LinkML metamodel schemas
pub const LINKML_NAMESPACE: &str = "https://w3id.org/linkml/";

/// Source of the built-in `linkml:types` schema
pub const LINKML_TYPES_YAML: &str = include_str!("linkml_types.yaml");
