//! Read-only queries over a loaded schema and its imports closure
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::documentation::naming::{camelcase, underscore};
use crate::model::serde_helpers::Named;
use crate::model::{
    ClassDefinition, Element, ElementKind, EnumDefinition, SchemaDefinition, SlotDefinition,
    SubsetDefinition, TypeDefinition,
};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Element collections merged over a set of schemas
#[derive(Debug, Clone, Default)]
struct ElementSet {
    classes: Vec<ClassDefinition>,
    slots: Vec<SlotDefinition>,
    types: Vec<TypeDefinition>,
    enums: Vec<EnumDefinition>,
    subsets: Vec<SubsetDefinition>,
}

impl ElementSet {
    /// First definition of a name wins; class attributes follow the schema's own slots
    fn collect<'a>(schemas: impl IntoIterator<Item = &'a SchemaDefinition>) -> Self {
        let mut set = Self::default();
        let mut seen: [HashSet<String>; 5] = Default::default();
        let [classes, slots, types, enums, subsets] = &mut seen;

        for schema in schemas {
            push_unique(&mut set.classes, classes, &schema.classes);
            push_unique(&mut set.slots, slots, &schema.slots);
            for class in &schema.classes {
                push_unique(&mut set.slots, slots, &class.attributes);
            }
            push_unique(&mut set.types, types, &schema.types);
            push_unique(&mut set.enums, enums, &schema.enums);
            push_unique(&mut set.subsets, subsets, &schema.subsets);
        }
        set
    }
}

fn push_unique<T: Named + Clone>(target: &mut Vec<T>, seen: &mut HashSet<String>, items: &[T]) {
    for item in items {
        if seen.insert(item.name().to_string()) {
            target.push(item.clone());
        }
    }
}

fn index_by_name<T: Named>(items: &[T]) -> HashMap<String, usize> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.name().to_string(), i))
        .collect()
}

/// Owns the root schema and every schema it imports
#[derive(Debug, Clone)]
pub struct SchemaView {
    root: SchemaDefinition,
    /// Imported schemas, each after the schemas it imports
    imported: Vec<SchemaDefinition>,
    local: ElementSet,
    merged: ElementSet,
    class_index: HashMap<String, usize>,
    slot_index: HashMap<String, usize>,
    type_index: HashMap<String, usize>,
    enum_index: HashMap<String, usize>,
    subset_index: HashMap<String, usize>,
    prefixes: BTreeMap<String, String>,
}

impl SchemaView {
    /// Build a view from a root schema and its imports in load order
    pub fn new(root: SchemaDefinition, imported: Vec<SchemaDefinition>) -> Self {
        let local = ElementSet::collect(std::iter::once(&root));
        let merged = ElementSet::collect(std::iter::once(&root).chain(imported.iter().rev()));

        // Root declarations shadow imported ones
        let mut prefixes = BTreeMap::new();
        for schema in std::iter::once(&root).chain(imported.iter().rev()) {
            for (prefix, expansion) in &schema.prefixes {
                prefixes
                    .entry(prefix.clone())
                    .or_insert_with(|| expansion.clone());
            }
        }

        let mut view = Self {
            class_index: index_by_name(&merged.classes),
            slot_index: index_by_name(&merged.slots),
            type_index: index_by_name(&merged.types),
            enum_index: index_by_name(&merged.enums),
            subset_index: index_by_name(&merged.subsets),
            root,
            imported,
            local,
            merged,
            prefixes,
        };
        view.compute_domain_of();
        view
    }

    fn compute_domain_of(&mut self) {
        let mut domains: HashMap<String, Vec<String>> = HashMap::new();
        for class in &self.merged.classes {
            for slot in class.direct_slot_names() {
                let entry = domains.entry(slot.to_string()).or_default();
                if !entry.iter().any(|c| c == &class.name) {
                    entry.push(class.name.clone());
                }
            }
        }

        for slot in self.merged.slots.iter_mut().chain(self.local.slots.iter_mut()) {
            if let Some(classes) = domains.get(&slot.name) {
                slot.domain_of = classes.clone();
            }
        }
    }

    /// The root schema
    pub fn schema(&self) -> &SchemaDefinition {
        &self.root
    }

    /// Every schema of the closure keyed by name
    pub fn schema_map(&self) -> BTreeMap<&str, &SchemaDefinition> {
        self.schemas().map(|s| (s.name.as_str(), s)).collect()
    }

    /// Schemas of the closure, imported schemas first and the root last
    pub fn schemas(&self) -> impl Iterator<Item = &SchemaDefinition> {
        self.imported.iter().chain(std::iter::once(&self.root))
    }

    /// Schema names of the closure, root last
    pub fn imports_closure(&self) -> Vec<&str> {
        self.schemas().map(|s| s.name.as_str()).collect()
    }

    /// Schema an element was defined in, by its `from_schema` id
    pub fn schema_of(&self, element: &Element<'_>) -> Option<&SchemaDefinition> {
        let id = element.from_schema()?;
        self.schemas().find(|s| s.id == id)
    }

    pub fn default_range(&self) -> Option<&str> {
        self.root.default_range.as_deref()
    }

    fn elements(&self, imports: bool) -> &ElementSet {
        if imports {
            &self.merged
        } else {
            &self.local
        }
    }

    pub fn all_classes(&self, imports: bool) -> Vec<&ClassDefinition> {
        self.elements(imports).classes.iter().collect()
    }

    pub fn all_slots(&self, imports: bool) -> Vec<&SlotDefinition> {
        self.elements(imports).slots.iter().collect()
    }

    pub fn all_types(&self, imports: bool) -> Vec<&TypeDefinition> {
        self.elements(imports).types.iter().collect()
    }

    pub fn all_enums(&self, imports: bool) -> Vec<&EnumDefinition> {
        self.elements(imports).enums.iter().collect()
    }

    pub fn all_subsets(&self, imports: bool) -> Vec<&SubsetDefinition> {
        self.elements(imports).subsets.iter().collect()
    }

    /// Elements of one kind as borrowed views
    pub fn all_elements(&self, kind: ElementKind, imports: bool) -> Vec<Element<'_>> {
        let set = self.elements(imports);
        match kind {
            ElementKind::Class => set.classes.iter().map(Element::Class).collect(),
            ElementKind::Slot => set.slots.iter().map(Element::Slot).collect(),
            ElementKind::Type => set.types.iter().map(Element::Type).collect(),
            ElementKind::Enum => set.enums.iter().map(Element::Enum).collect(),
            ElementKind::Subset => set.subsets.iter().map(Element::Subset).collect(),
        }
    }

    pub fn get_class(&self, name: &str) -> Option<&ClassDefinition> {
        self.class_index.get(name).map(|&i| &self.merged.classes[i])
    }

    pub fn get_slot(&self, name: &str) -> Option<&SlotDefinition> {
        self.slot_index.get(name).map(|&i| &self.merged.slots[i])
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.type_index.get(name).map(|&i| &self.merged.types[i])
    }

    pub fn get_enum(&self, name: &str) -> Option<&EnumDefinition> {
        self.enum_index.get(name).map(|&i| &self.merged.enums[i])
    }

    pub fn get_subset(&self, name: &str) -> Option<&SubsetDefinition> {
        self.subset_index.get(name).map(|&i| &self.merged.subsets[i])
    }

    /// Look a name up as a class, slot, type, enum and finally subset
    pub fn get_element(&self, name: &str) -> Option<Element<'_>> {
        self.get_class(name)
            .map(Element::Class)
            .or_else(|| self.get_slot(name).map(Element::Slot))
            .or_else(|| self.get_type(name).map(Element::Type))
            .or_else(|| self.get_enum(name).map(Element::Enum))
            .or_else(|| self.get_subset(name).map(Element::Subset))
    }

    /// Look a name up among elements of one kind only
    pub fn get_element_of_kind(&self, kind: ElementKind, name: &str) -> Option<Element<'_>> {
        match kind {
            ElementKind::Class => self.get_class(name).map(Element::Class),
            ElementKind::Slot => self.get_slot(name).map(Element::Slot),
            ElementKind::Type => self.get_type(name).map(Element::Type),
            ElementKind::Enum => self.get_enum(name).map(Element::Enum),
            ElementKind::Subset => self.get_subset(name).map(Element::Subset),
        }
    }

    /// Direct parents of a class, `is_a` before mixins
    pub fn class_parents(&self, name: &str, mixins: bool, is_a: bool) -> Vec<&str> {
        let Some(class) = self.get_class(name) else {
            return Vec::new();
        };
        let mut parents = Vec::new();
        if is_a {
            parents.extend(class.is_a.as_deref());
        }
        if mixins {
            parents.extend(class.mixins.iter().map(String::as_str));
        }
        parents
    }

    /// Classes naming `name` as a parent, in declaration order
    pub fn class_children(&self, name: &str, mixins: bool, imports: bool) -> Vec<&str> {
        self.elements(imports)
            .classes
            .iter()
            .filter(|c| {
                c.is_a.as_deref() == Some(name) || (mixins && c.mixins.iter().any(|m| m == name))
            })
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Classes with no parent inside the selected collection
    pub fn class_roots(&self, mixins: bool, imports: bool) -> Vec<&str> {
        let set = self.elements(imports);
        let present: HashSet<&str> = set.classes.iter().map(|c| c.name.as_str()).collect();
        set.classes
            .iter()
            .filter(|c| {
                self.class_parents(&c.name, mixins, true)
                    .iter()
                    .all(|p| !present.contains(p))
            })
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Ancestors depth first, nearest first; each name once
    pub fn class_ancestors(&self, name: &str, mixins: bool, reflexive: bool) -> Vec<String> {
        walk_ancestors(name, reflexive, &|n| {
            self.class_parents(n, mixins, true)
                .into_iter()
                .map(str::to_string)
                .collect()
        })
    }

    pub fn slot_parents(&self, name: &str, mixins: bool) -> Vec<&str> {
        let Some(slot) = self.get_slot(name) else {
            return Vec::new();
        };
        let mut parents: Vec<&str> = slot.is_a.as_deref().into_iter().collect();
        if mixins {
            parents.extend(slot.mixins.iter().map(String::as_str));
        }
        parents
    }

    pub fn slot_children(&self, name: &str, mixins: bool) -> Vec<&str> {
        self.merged
            .slots
            .iter()
            .filter(|s| {
                s.is_a.as_deref() == Some(name) || (mixins && s.mixins.iter().any(|m| m == name))
            })
            .map(|s| s.name.as_str())
            .collect()
    }

    pub fn slot_ancestors(&self, name: &str, mixins: bool, reflexive: bool) -> Vec<String> {
        walk_ancestors(name, reflexive, &|n| {
            self.slot_parents(n, mixins)
                .into_iter()
                .map(str::to_string)
                .collect()
        })
    }

    /// Names of all slots applicable to a class: own first, then inherited and mixed in
    pub fn class_slots(&self, name: &str) -> Vec<String> {
        let mut slots: Vec<String> = Vec::new();
        for ancestor in self.class_ancestors(name, true, true) {
            let Some(class) = self.get_class(&ancestor) else {
                continue;
            };
            for slot in class.direct_slot_names() {
                if !slots.iter().any(|s| s == slot) {
                    slots.push(slot.to_string());
                }
            }
        }
        slots
    }

    /// A slot as seen from a class.
    ///
    /// Starts from the nearest attribute or the global slot, fills unset values
    /// from the slot's `is_a` ancestors, then applies `slot_usage` from the most
    /// distant class ancestor to the class itself.
    pub fn induced_slot(&self, slot_name: &str, class_name: Option<&str>) -> Option<SlotDefinition> {
        let ancestors = class_name
            .map(|c| self.class_ancestors(c, true, true))
            .unwrap_or_default();

        let mut slot = ancestors
            .iter()
            .filter_map(|a| self.get_class(a))
            .find_map(|c| c.attribute(slot_name))
            .or_else(|| self.get_slot(slot_name))
            .cloned()?;

        for parent in self.slot_ancestors(slot_name, true, false) {
            if let Some(parent) = self.get_slot(&parent) {
                slot.inherit_from(parent);
            }
        }

        for ancestor in ancestors.iter().rev() {
            if let Some(usage) = self.get_class(ancestor).and_then(|c| c.usage(slot_name)) {
                slot.overlay(usage);
            }
        }

        if slot.range.is_none() {
            slot.range = self.root.default_range.clone();
        }
        if let Some(global) = self.get_slot(slot_name) {
            slot.domain_of = global.domain_of.clone();
        }
        Some(slot)
    }

    /// Every slot applicable to a class, induced from that class
    pub fn class_induced_slots(&self, class_name: &str) -> Vec<SlotDefinition> {
        self.class_slots(class_name)
            .iter()
            .filter_map(|s| self.induced_slot(s, Some(class_name)))
            .collect()
    }

    /// A type with unset values filled from its `typeof` chain
    pub fn induced_type(&self, name: &str) -> Option<TypeDefinition> {
        let mut induced = self.get_type(name)?.clone();
        let mut seen = HashSet::from([name.to_string()]);
        let mut parent = induced.type_of.clone();

        while let Some(parent_name) = parent {
            if !seen.insert(parent_name.clone()) {
                break;
            }
            let Some(ancestor) = self.get_type(&parent_name) else {
                break;
            };
            macro_rules! fill {
                ($($field:ident),*) => {
                    $(if induced.$field.is_none() { induced.$field = ancestor.$field.clone(); })*
                };
            }
            fill!(uri, base, repr, pattern, minimum_value, maximum_value);
            parent = ancestor.type_of.clone();
        }
        Some(induced)
    }

    /// URI of an element as a CURIE, or expanded.
    ///
    /// Elements without an explicit URI get `<default_prefix>:<name>` from the
    /// schema that defines them, with `<kind>/` after the prefix when
    /// `use_element_type` is set.
    pub fn get_uri(&self, element: &Element<'_>, expand: bool, use_element_type: bool) -> String {
        let owner = self.schema_of(element).unwrap_or(&self.root);

        let curie = match element.declared_uri() {
            Some(uri) => uri.to_string(),
            None => {
                let local = match element.kind() {
                    ElementKind::Slot => underscore(element.name()),
                    _ => camelcase(element.name()),
                };
                let kind = if use_element_type {
                    format!("{}/", element.kind())
                } else {
                    String::new()
                };
                format!("{}:{}{}", owner.default_prefix(), kind, local)
            }
        };

        if !expand {
            return curie;
        }

        let expanded = self.expand_curie(&curie);
        if expanded != curie {
            return expanded;
        }

        // An undeclared default prefix stands for the owning schema's namespace
        match curie.split_once(':') {
            Some((prefix, local)) if prefix == owner.default_prefix() && element.declared_uri().is_none() => {
                let sep = if owner.id.ends_with('/') || owner.id.ends_with('#') {
                    ""
                } else {
                    "/"
                };
                format!("{}{}{}", owner.id, sep, local)
            }
            _ => curie,
        }
    }

    /// Expand a CURIE through the closure's prefix map; anything else is returned as is
    pub fn expand_curie(&self, curie: &str) -> String {
        match curie.split_once(':') {
            Some((_, local)) if local.starts_with("//") => curie.to_string(),
            Some((prefix, local)) => match self.prefixes.get(prefix) {
                Some(expansion) => format!("{}{}", expansion, local),
                None => curie.to_string(),
            },
            None => curie.to_string(),
        }
    }
}

fn walk_ancestors(start: &str, reflexive: bool, parents: &dyn Fn(&str) -> Vec<String>) -> Vec<String> {
    fn visit(
        name: &str,
        parents: &dyn Fn(&str) -> Vec<String>,
        seen: &mut HashSet<String>,
        out: &mut Vec<String>,
    ) {
        for parent in parents(name) {
            if seen.insert(parent.clone()) {
                out.push(parent.clone());
                visit(&parent, parents, seen, out);
            }
        }
    }

    let mut seen = HashSet::from([start.to_string()]);
    let mut out = Vec::new();
    if reflexive {
        out.push(start.to_string());
    }
    visit(start, parents, &mut seen, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{Format, SchemaLoader};
    use std::path::Path;

    const PERSONINFO: &str = r#"
id: https://example.org/personinfo
name: personinfo
default_prefix: personinfo
default_range: string
prefixes:
  personinfo: https://example.org/personinfo/
  schema: http://schema.org/
imports:
  - linkml:types
classes:
  NamedThing:
    slots: [id, name]
    slot_usage:
      id:
        identifier: true
  HasAliases:
    mixin: true
    attributes:
      aliases:
        multivalued: true
  Person:
    is_a: NamedThing
    mixins: [HasAliases]
    class_uri: schema:Person
    slots: [age]
    slot_usage:
      name:
        required: true
  Employee:
    is_a: Person
    attributes:
      employer:
        range: Organization
  Organization:
    is_a: NamedThing
slots:
  id:
    range: uriorcurie
  name:
    slot_uri: schema:name
  age:
    range: integer
  full_name:
    is_a: name
enums:
  Status:
    permissible_values:
      ACTIVE:
"#;

    fn view() -> SchemaView {
        SchemaLoader::new()
            .load_str(PERSONINFO, Format::Yaml, Path::new("."))
            .unwrap()
    }

    #[test]
    fn test_collections_and_lookup() {
        let view = view();
        let local: Vec<_> = view.all_classes(false).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(local, vec!["NamedThing", "HasAliases", "Person", "Employee", "Organization"]);

        // attributes are surfaced after the schema's own slots
        let slots: Vec<_> = view.all_slots(false).iter().map(|s| s.name.as_str()).collect();
        assert_eq!(slots, vec!["id", "name", "age", "full_name", "aliases", "employer"]);

        assert!(view.all_types(false).is_empty());
        assert!(view.all_types(true).iter().any(|t| t.name == "string"));

        assert_eq!(view.get_element("Person").unwrap().kind(), ElementKind::Class);
        assert_eq!(view.get_element("age").unwrap().kind(), ElementKind::Slot);
        assert_eq!(view.get_element("integer").unwrap().kind(), ElementKind::Type);
        assert_eq!(view.get_element("Status").unwrap().kind(), ElementKind::Enum);
        assert!(view.get_element("Nothing").is_none());
    }

    #[test]
    fn test_class_hierarchy_queries() {
        let view = view();
        assert_eq!(view.class_parents("Person", true, true), vec!["NamedThing", "HasAliases"]);
        assert_eq!(view.class_children("NamedThing", false, false), vec!["Person", "Organization"]);
        assert_eq!(view.class_children("HasAliases", true, false), vec!["Person"]);
        assert_eq!(view.class_roots(false, false), vec!["NamedThing", "HasAliases"]);
        assert_eq!(
            view.class_ancestors("Employee", true, true),
            vec!["Employee", "Person", "NamedThing", "HasAliases"]
        );
        assert_eq!(view.slot_children("name", false), vec!["full_name"]);
    }

    #[test]
    fn test_induced_slots() {
        let view = view();
        assert_eq!(
            view.class_slots("Employee"),
            vec!["employer", "age", "id", "name", "aliases"]
        );

        let id = view.induced_slot("id", Some("Employee")).unwrap();
        assert!(id.is_identifier());
        assert_eq!(id.range.as_deref(), Some("uriorcurie"));
        assert_eq!(id.domain_of, vec!["NamedThing"]);

        let name = view.induced_slot("name", Some("Person")).unwrap();
        assert!(name.is_required());
        assert_eq!(name.range.as_deref(), Some("string"));

        let name = view.induced_slot("name", Some("Organization")).unwrap();
        assert!(!name.is_required());

        let full_name = view.induced_slot("full_name", None).unwrap();
        assert_eq!(full_name.range.as_deref(), Some("string"));

        let aliases = view.induced_slot("aliases", Some("Person")).unwrap();
        assert!(aliases.is_multivalued());
        assert!(view.induced_slot("missing", None).is_none());
    }

    #[test]
    fn test_uris() {
        let view = view();
        let person = Element::Class(view.get_class("Person").unwrap());
        assert_eq!(view.get_uri(&person, false, false), "schema:Person");
        assert_eq!(view.get_uri(&person, true, false), "http://schema.org/Person");

        let org = Element::Class(view.get_class("Organization").unwrap());
        assert_eq!(view.get_uri(&org, false, true), "personinfo:class/Organization");
        assert_eq!(
            view.get_uri(&org, true, false),
            "https://example.org/personinfo/Organization"
        );

        let string = Element::Type(view.get_type("string").unwrap());
        assert_eq!(view.get_uri(&string, false, false), "xsd:string");
        assert_eq!(view.expand_curie("unknown:thing"), "unknown:thing");
        assert_eq!(view.expand_curie("https://example.org/x"), "https://example.org/x");
    }

    #[test]
    fn test_induced_type_follows_typeof() {
        let schema = SchemaDefinition::from_value(
            serde_json::json!({
                "id": "https://example.org/t",
                "name": "t",
                "imports": ["linkml:types"],
                "types": {"phone": {"typeof": "string", "pattern": "^[0-9-]+$"}}
            }),
            Path::new("t.yaml"),
        )
        .unwrap();
        let types = SchemaDefinition::from_value(
            serde_json::to_value(
                serde_yaml::from_str::<serde_yaml::Value>(crate::model::LINKML_TYPES_YAML).unwrap(),
            )
            .unwrap(),
            Path::new("types.yaml"),
        )
        .unwrap();
        let view = SchemaView::new(schema, vec![types]);

        let phone = view.induced_type("phone").unwrap();
        assert_eq!(phone.base.as_deref(), Some("str"));
        assert_eq!(phone.uri.as_deref(), Some("xsd:string"));
        assert_eq!(phone.pattern.as_deref(), Some("^[0-9-]+$"));
    }
}
