//! Render-ready page models
//!
//! Templates only see these plain structures; every link, tree and
//! cardinality is computed before rendering.
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::documentation::cardinality::{cardinality, number_value_range, value_range};
use crate::documentation::diagram::renderer_for;
use crate::documentation::error::{GeneratorError, GeneratorResult};
use crate::documentation::examples::ExampleBlob;
use crate::documentation::generator::DocGenerator;
use crate::documentation::config::SortBy;
use crate::documentation::links::LinkTarget;
use crate::documentation::rules::{class_rules, RuleRow};
use crate::model::{
    ClassDefinition, Element, ElementKind, EnumDefinition, SchemaDefinition, SlotDefinition,
    SubsetDefinition, TypeDefinition,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Rank assumed for elements that declare none
pub const MAX_RANK: i64 = 1000;

/// Range assumed for slots with no range anywhere in the schema
const FALLBACK_RANGE: &str = "string";

/// Run-wide values every template can read as `settings`
#[derive(Debug, Clone, Serialize)]
pub struct RenderSettings {
    pub schema_title: String,
    pub format: String,
    pub mermaid_directive: String,
    pub diagram_type: Option<String>,
    pub include_top_level_diagram: bool,
    pub hierarchical_class_view: bool,
    pub sort_by: SortBy,
}

/// One element in a listing table
#[derive(Debug, Clone, Serialize)]
pub struct ElementRow {
    pub name: String,
    pub link: String,
    pub description: Option<String>,
    /// Nesting level in hierarchical listings
    pub depth: usize,
}

/// One slot in a class or listing table
#[derive(Debug, Clone, Serialize)]
pub struct SlotRow {
    pub name: String,
    pub link: String,
    pub cardinality: String,
    pub range: String,
    pub description: Option<String>,
    /// Ancestor classes the slot is inherited from; empty when declared directly
    pub inherited_from: Vec<String>,
    pub value_range: Option<String>,
}

/// Where an element is referenced from
#[derive(Debug, Clone, Serialize)]
pub struct UsageRow {
    pub used_by: String,
    pub used_in: String,
    pub usage: &'static str,
}

/// A class a slot applies to
#[derive(Debug, Clone, Serialize)]
pub struct ApplicableClass {
    pub link: String,
    pub description: Option<String>,
    /// Whether the class declares the slot itself
    pub direct: bool,
}

/// Slots a class acquires through one of its mixins
#[derive(Debug, Clone, Serialize)]
pub struct MixinSlots {
    pub mixin: String,
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PermissibleValueRow {
    pub text: String,
    pub description: Option<String>,
    pub meaning: Option<String>,
}

/// Fields shared by every element page
#[derive(Debug, Clone, Serialize)]
pub struct ElementHeader {
    pub kind: ElementKind,
    pub name: String,
    pub raw_name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub uri: String,
    pub curie: String,
    pub uri_link: String,
    pub from_schema: Option<String>,
    pub in_subset: Vec<String>,
    pub source_yaml: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexPage {
    pub name: String,
    pub title: String,
    pub id: String,
    pub description: Option<String>,
    pub version: Option<String>,
    pub license: Option<String>,
    pub classes: Vec<ElementRow>,
    pub slots: Vec<ElementRow>,
    pub enums: Vec<ElementRow>,
    pub types: Vec<ElementRow>,
    pub subsets: Vec<ElementRow>,
    pub diagram: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaPage {
    pub name: String,
    pub title: String,
    pub id: String,
    pub description: Option<String>,
    pub version: Option<String>,
    pub license: Option<String>,
    pub imports: Vec<String>,
    pub is_root: bool,
    pub classes: Vec<ElementRow>,
    pub slots: Vec<ElementRow>,
    pub enums: Vec<ElementRow>,
    pub types: Vec<ElementRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassPage {
    #[serde(flatten)]
    pub header: ElementHeader,
    pub is_abstract: bool,
    pub is_mixin: bool,
    pub tree: String,
    pub diagram: Option<String>,
    pub slots: Vec<SlotRow>,
    pub mixin_slots: Vec<MixinSlots>,
    pub usages: Vec<UsageRow>,
    pub rules: Vec<RuleRow>,
    pub examples: Vec<ExampleBlob>,
    pub aliases: Vec<String>,
    pub comments: Vec<String>,
    pub see_also: Vec<String>,
    pub induced_yaml: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotPage {
    #[serde(flatten)]
    pub header: ElementHeader,
    pub tree: String,
    pub cardinality: String,
    pub range: String,
    pub domain: Option<String>,
    pub value_range: Option<String>,
    pub pattern: Option<String>,
    pub required: bool,
    pub recommended: bool,
    pub multivalued: bool,
    pub identifier: bool,
    pub applicable_classes: Vec<ApplicableClass>,
    pub aliases: Vec<String>,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumPage {
    #[serde(flatten)]
    pub header: ElementHeader,
    pub permissible_values: Vec<PermissibleValueRow>,
    pub usages: Vec<UsageRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypePage {
    #[serde(flatten)]
    pub header: ElementHeader,
    pub type_of: Option<String>,
    pub base: Option<String>,
    pub repr: Option<String>,
    pub pattern: Option<String>,
    pub value_range: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubsetPage {
    #[serde(flatten)]
    pub header: ElementHeader,
    pub classes: Vec<ElementRow>,
    pub slots: Vec<ElementRow>,
    pub enums: Vec<ElementRow>,
    pub types: Vec<ElementRow>,
}

fn to_yaml<T: Serialize>(name: &str, value: &T) -> GeneratorResult<String> {
    serde_yaml::to_string(value).map_err(|e| GeneratorError::Yaml {
        element: name.to_string(),
        source: e,
    })
}

impl DocGenerator {
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            schema_title: self.schema_title().to_string(),
            format: self.config.format.to_string(),
            mermaid_directive: self.config.mermaid_directive().to_string(),
            diagram_type: self.config.diagram_type.map(|d| d.as_str().to_string()),
            include_top_level_diagram: self.config.include_top_level_diagram,
            hierarchical_class_view: self.config.hierarchical_class_view,
            sort_by: self.config.sort_by,
        }
    }

    /// Order elements by the configured key; rank defaults to [`MAX_RANK`], title to name
    pub fn sort_elements(&self, elements: &mut [Element<'_>]) {
        match self.config.sort_by {
            SortBy::Name => elements.sort_by_key(|e| e.name().to_lowercase()),
            SortBy::Rank => elements.sort_by_key(|e| e.rank().unwrap_or(MAX_RANK)),
            SortBy::Title => {
                elements.sort_by_key(|e| e.title().unwrap_or(e.name()).to_lowercase())
            }
        }
    }

    fn element_row(&self, element: Element<'_>, depth: usize, index_link: bool) -> ElementRow {
        ElementRow {
            name: self.name(&element),
            link: self.link(element, index_link),
            description: element.description().map(str::to_string),
            depth,
        }
    }

    fn element_rows(&self, mut elements: Vec<Element<'_>>, index_link: bool) -> Vec<ElementRow> {
        self.sort_elements(&mut elements);
        elements
            .into_iter()
            .map(|e| self.element_row(e, 0, index_link))
            .collect()
    }

    /// Range of a slot, falling back to the schema default and then `string`
    fn slot_range<'a>(&'a self, slot: &'a SlotDefinition) -> &'a str {
        slot.range
            .as_deref()
            .or_else(|| self.view.default_range())
            .unwrap_or(FALLBACK_RANGE)
    }

    fn slot_row(&self, slot: &SlotDefinition, class: Option<&str>) -> SlotRow {
        let inherited_from = match class {
            Some(class) => self
                .view
                .class_ancestors(class, true, false)
                .iter()
                .filter(|a| slot.domain_of.contains(a))
                .filter(|_| !slot.domain_of.iter().any(|d| d == class))
                .map(|a| self.link(a, false))
                .collect(),
            None => Vec::new(),
        };

        SlotRow {
            name: self.name(&Element::Slot(slot)),
            link: self.link(Element::Slot(slot), false),
            cardinality: cardinality(slot),
            range: self.link(self.slot_range(slot), false),
            description: slot.description.clone(),
            inherited_from,
            value_range: number_value_range(slot),
        }
    }

    fn header(&self, element: Element<'_>) -> GeneratorResult<ElementHeader> {
        let source_yaml = match element {
            Element::Class(c) => to_yaml(&c.name, c)?,
            Element::Slot(s) => to_yaml(&s.name, s)?,
            Element::Type(t) => to_yaml(&t.name, t)?,
            Element::Enum(e) => to_yaml(&e.name, e)?,
            Element::Subset(s) => to_yaml(&s.name, s)?,
        };

        Ok(ElementHeader {
            kind: element.kind(),
            name: self.name(&element),
            raw_name: element.name().to_string(),
            title: element.title().map(str::to_string),
            description: element.description().map(str::to_string),
            uri: self.uri(&element, true),
            curie: self.uri(&element, false),
            uri_link: self.uri_link(&element),
            from_schema: element.from_schema().map(str::to_string),
            in_subset: self.links(element.in_subset()),
            source_yaml,
        })
    }

    /// Classes whose slots take `target` as their range
    fn range_usages(&self, target: &str) -> Vec<UsageRow> {
        let mut usages = Vec::new();
        for class in self.view.all_classes(true) {
            for slot_name in class.direct_slot_names() {
                let Some(slot) = self.view.induced_slot(slot_name, Some(&class.name)) else {
                    continue;
                };
                if self.slot_range(&slot) == target {
                    usages.push(UsageRow {
                        used_by: self.link(Element::Class(class), false),
                        used_in: self.link(Element::Slot(&slot), false),
                        usage: "range",
                    });
                }
            }
        }
        usages
    }

    /// Fenced diagram of `classes`, when a diagram type is configured
    pub fn diagram(&self, classes: &[&str]) -> Option<String> {
        let diagram_type = self.config.diagram_type?;
        let links: BTreeMap<String, String> = self
            .view
            .all_classes(true)
            .into_iter()
            .map(|c| (c.name.clone(), self.link_mermaid(Element::Class(c))))
            .collect();
        let renderer = renderer_for(diagram_type, self.config.mermaid_directive(), links);
        let source = renderer.render(&self.view, classes);
        Some(format!("```{}\n{}```\n", renderer.fence(), source))
    }

    /// A class with its parents, children and the classes its slots point to
    fn class_neighbourhood<'a>(&'a self, class: &'a ClassDefinition) -> Vec<&'a str> {
        let mut names = vec![class.name.as_str()];
        names.extend(self.view.class_parents(&class.name, true, true));
        names.extend(self.view.class_children(&class.name, true, true));
        for slot in class.direct_slot_names() {
            let range = self
                .view
                .get_slot(slot)
                .or_else(|| class.attribute(slot))
                .and_then(|s| s.range.as_deref());
            if let Some(range) = range.filter(|r| self.view.get_class(r).is_some()) {
                names.push(range);
            }
        }
        let mut seen = HashSet::new();
        names.retain(|n| seen.insert(*n));
        names
    }

    pub fn index_page(&self) -> IndexPage {
        let schema = self.view.schema();
        let imports = self.config.render_imports;

        let classes = if self.config.hierarchical_class_view {
            self.class_hierarchy_as_tuples()
                .into_iter()
                .filter_map(|(depth, name)| {
                    self.view
                        .get_class(&name)
                        .map(|c| self.element_row(Element::Class(c), depth, true))
                })
                .collect()
        } else {
            self.element_rows(self.view.all_elements(ElementKind::Class, imports), true)
        };

        let diagram = if self.config.include_top_level_diagram {
            self.diagram(&[])
        } else {
            None
        };

        IndexPage {
            name: schema.name.clone(),
            title: self.schema_title().to_string(),
            id: schema.id.clone(),
            description: schema.description.clone(),
            version: schema.version.clone(),
            license: schema.license.clone(),
            classes,
            slots: self.element_rows(self.view.all_elements(ElementKind::Slot, imports), true),
            enums: self.element_rows(self.view.all_elements(ElementKind::Enum, imports), true),
            types: self.element_rows(self.view.all_elements(ElementKind::Type, imports), true),
            subsets: self.element_rows(self.view.all_elements(ElementKind::Subset, imports), true),
            diagram,
        }
    }

    pub fn schema_page(&self, schema: &SchemaDefinition) -> SchemaPage {
        let rows = |elements: Vec<Element<'_>>| self.element_rows(elements, false);
        SchemaPage {
            name: schema.name.clone(),
            title: schema.title.clone().unwrap_or_else(|| schema.name.clone()),
            id: schema.id.clone(),
            description: schema.description.clone(),
            version: schema.version.clone(),
            license: schema.license.clone(),
            imports: schema.imports.clone(),
            is_root: schema.id == self.view.schema().id,
            classes: rows(schema.classes.iter().map(Element::Class).collect()),
            slots: rows(schema.slots.iter().map(Element::Slot).collect()),
            enums: rows(schema.enums.iter().map(Element::Enum).collect()),
            types: rows(schema.types.iter().map(Element::Type).collect()),
        }
    }

    pub fn class_page(&self, class: &ClassDefinition) -> GeneratorResult<ClassPage> {
        let element = Element::Class(class);
        let induced = self.view.class_induced_slots(&class.name);

        let mut induced_class = class.clone();
        induced_class.slots.clear();
        induced_class.attributes = induced.clone();

        Ok(ClassPage {
            header: self.header(element)?,
            is_abstract: class.abstract_,
            is_mixin: class.mixin,
            tree: self.inheritance_tree(&element, true, true),
            diagram: self.diagram(&self.class_neighbourhood(class)),
            slots: induced
                .iter()
                .map(|slot| self.slot_row(slot, Some(&class.name)))
                .collect(),
            mixin_slots: self.mixin_inherited_slots(class),
            usages: self.range_usages(&class.name),
            rules: class_rules(class),
            examples: self.example_object_blobs(&class.name)?,
            aliases: class.aliases.clone(),
            comments: class.comments.clone(),
            see_also: class.see_also.iter().map(|s| self.curie_link(s)).collect(),
            induced_yaml: to_yaml(&class.name, &induced_class)?,
        })
    }

    /// Slots of each direct mixin, including what the mixin inherits
    pub fn mixin_inherited_slots(&self, class: &ClassDefinition) -> Vec<MixinSlots> {
        self.view
            .class_parents(&class.name, true, false)
            .into_iter()
            .map(|mixin| MixinSlots {
                mixin: self.link(mixin, false),
                slots: self.links(&self.view.class_slots(mixin)),
            })
            .collect()
    }

    pub fn slot_page(&self, slot: &SlotDefinition) -> GeneratorResult<SlotPage> {
        let element = Element::Slot(slot);
        let applicable_classes = self
            .view
            .all_classes(true)
            .into_iter()
            .filter(|c| self.view.class_slots(&c.name).iter().any(|s| s == &slot.name))
            .map(|c| ApplicableClass {
                link: self.link(Element::Class(c), false),
                description: c.description.clone(),
                direct: slot.domain_of.iter().any(|d| d == &c.name),
            })
            .collect();

        Ok(SlotPage {
            header: self.header(element)?,
            tree: self.inheritance_tree(&element, true, true),
            cardinality: cardinality(slot),
            range: self.link(self.slot_range(slot), false),
            domain: slot.domain.as_deref().map(|d| self.link(d, false)),
            value_range: number_value_range(slot),
            pattern: slot.pattern.clone(),
            required: slot.is_required(),
            recommended: slot.is_recommended(),
            multivalued: slot.is_multivalued(),
            identifier: slot.is_identifier(),
            applicable_classes,
            aliases: slot.aliases.clone(),
            comments: slot.comments.clone(),
        })
    }

    pub fn enum_page(&self, e: &EnumDefinition) -> GeneratorResult<EnumPage> {
        Ok(EnumPage {
            header: self.header(Element::Enum(e))?,
            permissible_values: e
                .permissible_values
                .iter()
                .map(|pv| PermissibleValueRow {
                    text: pv.text.clone(),
                    description: pv.description.clone(),
                    meaning: pv.meaning.as_deref().map(|m| self.curie_link(m)),
                })
                .collect(),
            usages: self.range_usages(&e.name),
        })
    }

    pub fn type_page(&self, ty: &TypeDefinition) -> GeneratorResult<TypePage> {
        Ok(TypePage {
            header: self.header(Element::Type(ty))?,
            type_of: ty
                .type_of
                .as_deref()
                .map(|t| self.link(LinkTarget::Name(t), false)),
            base: ty.base.clone(),
            repr: ty.repr.clone(),
            pattern: ty.pattern.clone(),
            value_range: value_range(ty.minimum_value.as_ref(), ty.maximum_value.as_ref()),
        })
    }

    pub fn subset_page(&self, subset: &SubsetDefinition) -> GeneratorResult<SubsetPage> {
        let members = |kind: ElementKind| {
            let elements = self
                .view
                .all_elements(kind, true)
                .into_iter()
                .filter(|e| e.in_subset().iter().any(|s| s == &subset.name))
                .collect();
            self.element_rows(elements, false)
        };

        Ok(SubsetPage {
            header: self.header(Element::Subset(subset))?,
            classes: members(ElementKind::Class),
            slots: members(ElementKind::Slot),
            enums: members(ElementKind::Enum),
            types: members(ElementKind::Type),
        })
    }
}
