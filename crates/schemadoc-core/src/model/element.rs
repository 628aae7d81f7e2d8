//! Element definitions: classes, slots, types, enums and subsets
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::model::serde_helpers::{list_or_null, named_map, one_or_many, Named};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Kind of schema element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Class,
    Slot,
    Type,
    Enum,
    Subset,
}

impl ElementKind {
    /// All kinds, in the order documents are generated
    pub const ALL: [ElementKind; 5] = [
        ElementKind::Class,
        ElementKind::Slot,
        ElementKind::Enum,
        ElementKind::Type,
        ElementKind::Subset,
    ];

    /// Output subfolder used when pages are separated by kind
    pub fn subfolder(&self) -> &'static str {
        match self {
            ElementKind::Class => "classes",
            ElementKind::Slot => "slots",
            ElementKind::Type => "types",
            ElementKind::Enum => "enums",
            ElementKind::Subset => "subsets",
        }
    }

    /// Short kind name, also the template stem
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Class => "class",
            ElementKind::Slot => "slot",
            ElementKind::Type => "type",
            ElementKind::Enum => "enum",
            ElementKind::Subset => "subset",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A class definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    #[serde(deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub see_also: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_a: Option<String>,
    #[serde(deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<String>,
    #[serde(deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<String>,
    #[serde(deserialize_with = "named_map", skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<SlotDefinition>,
    #[serde(deserialize_with = "named_map", skip_serializing_if = "Vec::is_empty")]
    pub slot_usage: Vec<SlotDefinition>,
    #[serde(deserialize_with = "list_or_null", skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<ClassRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_uri: Option<String>,
    #[serde(rename = "abstract", skip_serializing_if = "is_false")]
    pub abstract_: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub mixin: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub tree_root: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<i64>,
    #[serde(deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub in_subset: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_schema: Option<String>,
}

impl ClassDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Names of slots declared directly on this class, `slots` first then `attributes`
    pub fn direct_slot_names(&self) -> Vec<&str> {
        self.slots
            .iter()
            .map(String::as_str)
            .chain(self.attributes.iter().map(|a| a.name.as_str()))
            .collect()
    }

    pub fn attribute(&self, name: &str) -> Option<&SlotDefinition> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn usage(&self, name: &str) -> Option<&SlotDefinition> {
        self.slot_usage.iter().find(|u| u.name == name)
    }
}

impl Named for ClassDefinition {
    fn name(&self) -> &str {
        &self.name
    }
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// A conditional constraint on a class.
///
/// Conditions are kept as loaded; only their shape is shown in documentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preconditions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postconditions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elseconditions: Option<Value>,
    #[serde(skip_serializing_if = "is_false")]
    pub bidirectional: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub deactivated: bool,
}

/// A slot definition, also used for class attributes and slot usages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_a: Option<String>,
    #[serde(deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multivalued: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inlined: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_cardinality: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_cardinality: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_cardinality: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_value: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_value: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<i64>,
    #[serde(deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub in_subset: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_schema: Option<String>,
    /// Classes that declare this slot; computed by the schema view
    #[serde(skip)]
    pub domain_of: Vec<String>,
}

impl SlotDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    pub fn is_recommended(&self) -> bool {
        self.recommended.unwrap_or(false)
    }

    pub fn is_multivalued(&self) -> bool {
        self.multivalued.unwrap_or(false)
    }

    pub fn is_identifier(&self) -> bool {
        self.identifier.unwrap_or(false)
    }

    /// Apply every value set on `other`, leaving the rest untouched
    pub fn overlay(&mut self, other: &SlotDefinition) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field.clone(); })*
            };
        }
        take!(
            title, description, is_a, slot_uri, range, domain, required, recommended,
            multivalued, identifier, key, inlined, minimum_cardinality, maximum_cardinality,
            exact_cardinality, minimum_value, maximum_value, pattern, rank, deprecated
        );
        if !other.aliases.is_empty() {
            self.aliases = other.aliases.clone();
        }
        if !other.comments.is_empty() {
            self.comments = other.comments.clone();
        }
        if !other.mixins.is_empty() {
            self.mixins = other.mixins.clone();
        }
        if !other.in_subset.is_empty() {
            self.in_subset = other.in_subset.clone();
        }
    }

    /// Fill unset inheritable values from an is-a parent
    pub fn inherit_from(&mut self, parent: &SlotDefinition) {
        macro_rules! fill {
            ($($field:ident),*) => {
                $(if self.$field.is_none() { self.$field = parent.$field.clone(); })*
            };
        }
        fill!(
            range, domain, required, recommended, multivalued, identifier, key, inlined,
            minimum_cardinality, maximum_cardinality, exact_cardinality, minimum_value,
            maximum_value, pattern
        );
    }
}

impl Named for SlotDefinition {
    fn name(&self) -> &str {
        &self.name
    }
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// A type definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "typeof", skip_serializing_if = "Option::is_none")]
    pub type_of: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_value: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_value: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<i64>,
    #[serde(deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub in_subset: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_schema: Option<String>,
}

impl Named for TypeDefinition {
    fn name(&self) -> &str {
        &self.name
    }
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// One permissible value of an enumeration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissibleValue {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
}

impl Named for PermissibleValue {
    fn name(&self) -> &str {
        &self.text
    }
    fn set_name(&mut self, name: String) {
        self.text = name;
    }
}

/// An enumeration definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_uri: Option<String>,
    #[serde(deserialize_with = "named_map", skip_serializing_if = "Vec::is_empty")]
    pub permissible_values: Vec<PermissibleValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<i64>,
    #[serde(deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub in_subset: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_schema: Option<String>,
}

impl Named for EnumDefinition {
    fn name(&self) -> &str {
        &self.name
    }
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// A subset definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubsetDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_schema: Option<String>,
}

impl Named for SubsetDefinition {
    fn name(&self) -> &str {
        &self.name
    }
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// Borrowed view over any element definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element<'a> {
    Class(&'a ClassDefinition),
    Slot(&'a SlotDefinition),
    Type(&'a TypeDefinition),
    Enum(&'a EnumDefinition),
    Subset(&'a SubsetDefinition),
}

impl<'a> Element<'a> {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Class(_) => ElementKind::Class,
            Element::Slot(_) => ElementKind::Slot,
            Element::Type(_) => ElementKind::Type,
            Element::Enum(_) => ElementKind::Enum,
            Element::Subset(_) => ElementKind::Subset,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            Element::Class(c) => &c.name,
            Element::Slot(s) => &s.name,
            Element::Type(t) => &t.name,
            Element::Enum(e) => &e.name,
            Element::Subset(s) => &s.name,
        }
    }

    pub fn title(&self) -> Option<&'a str> {
        match self {
            Element::Class(c) => c.title.as_deref(),
            Element::Slot(s) => s.title.as_deref(),
            Element::Type(t) => t.title.as_deref(),
            Element::Enum(e) => e.title.as_deref(),
            Element::Subset(s) => s.title.as_deref(),
        }
    }

    pub fn description(&self) -> Option<&'a str> {
        match self {
            Element::Class(c) => c.description.as_deref(),
            Element::Slot(s) => s.description.as_deref(),
            Element::Type(t) => t.description.as_deref(),
            Element::Enum(e) => e.description.as_deref(),
            Element::Subset(s) => s.description.as_deref(),
        }
    }

    pub fn rank(&self) -> Option<i64> {
        match self {
            Element::Class(c) => c.rank,
            Element::Slot(s) => s.rank,
            Element::Type(t) => t.rank,
            Element::Enum(e) => e.rank,
            Element::Subset(s) => s.rank,
        }
    }

    /// Parent by inheritance; only classes, slots and types have one
    pub fn is_a(&self) -> Option<&'a str> {
        match self {
            Element::Class(c) => c.is_a.as_deref(),
            Element::Slot(s) => s.is_a.as_deref(),
            Element::Type(t) => t.type_of.as_deref(),
            Element::Enum(_) | Element::Subset(_) => None,
        }
    }

    pub fn mixins(&self) -> &'a [String] {
        match self {
            Element::Class(c) => &c.mixins,
            Element::Slot(s) => &s.mixins,
            _ => &[],
        }
    }

    /// Explicitly declared URI, if any
    pub fn declared_uri(&self) -> Option<&'a str> {
        match self {
            Element::Class(c) => c.class_uri.as_deref(),
            Element::Slot(s) => s.slot_uri.as_deref(),
            Element::Type(t) => t.uri.as_deref(),
            Element::Enum(e) => e.enum_uri.as_deref(),
            Element::Subset(_) => None,
        }
    }

    pub fn from_schema(&self) -> Option<&'a str> {
        match self {
            Element::Class(c) => c.from_schema.as_deref(),
            Element::Slot(s) => s.from_schema.as_deref(),
            Element::Type(t) => t.from_schema.as_deref(),
            Element::Enum(e) => e.from_schema.as_deref(),
            Element::Subset(s) => s.from_schema.as_deref(),
        }
    }

    pub fn in_subset(&self) -> &'a [String] {
        match self {
            Element::Class(c) => &c.in_subset,
            Element::Slot(s) => &s.in_subset,
            Element::Type(t) => &t.in_subset,
            Element::Enum(e) => &e.in_subset,
            Element::Subset(_) => &[],
        }
    }
}
