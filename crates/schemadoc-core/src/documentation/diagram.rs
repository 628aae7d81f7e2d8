//! Class diagrams: mermaid class, mermaid ER and PlantUML
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::documentation::cardinality::cardinality;
use crate::documentation::config::DiagramType;
use crate::documentation::naming::{camelcase, underscore};
use crate::model::SlotDefinition;
use crate::view::SchemaView;
use std::collections::{BTreeMap, HashSet};

/// Renders the source of a diagram for a set of classes
pub trait DiagramRenderer {
    /// Diagram for `classes`, or for every class of the root schema when empty
    fn render(&self, view: &SchemaView, classes: &[&str]) -> String;

    /// Language tag of the fenced block the diagram is embedded in
    fn fence(&self) -> &str;
}

/// Renderer for a configured diagram type
pub fn renderer_for(
    diagram_type: DiagramType,
    mermaid_directive: &str,
    links: BTreeMap<String, String>,
) -> Box<dyn DiagramRenderer> {
    match diagram_type {
        DiagramType::MermaidClassDiagram => Box::new(
            MermaidClassDiagram::new(mermaid_directive).with_links(links),
        ),
        DiagramType::ErDiagram => Box::new(MermaidErDiagram::new(mermaid_directive)),
        DiagramType::PlantumlClassDiagram => Box::new(PlantUmlClassDiagram),
    }
}

/// A class with the slots it shows in a diagram
struct DiagramClass {
    name: String,
    is_a: Option<String>,
    mixins: Vec<String>,
    slots: Vec<SlotDefinition>,
}

fn collect_classes(view: &SchemaView, classes: &[&str]) -> Vec<DiagramClass> {
    let names: Vec<&str> = if classes.is_empty() {
        view.all_classes(false)
            .into_iter()
            .map(|c| c.name.as_str())
            .collect()
    } else {
        classes.to_vec()
    };

    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(*name))
        .filter_map(|name| view.get_class(name))
        .map(|class| DiagramClass {
            name: class.name.clone(),
            is_a: class.is_a.clone(),
            mixins: class.mixins.clone(),
            slots: class
                .direct_slot_names()
                .into_iter()
                .filter_map(|slot| view.induced_slot(slot, Some(&class.name)))
                .collect(),
        })
        .collect()
}

/// Range of a slot when it names a class drawn in the same diagram
fn class_range<'a>(present: &HashSet<&str>, slot: &'a SlotDefinition) -> Option<&'a str> {
    slot.range.as_deref().filter(|range| present.contains(range))
}

fn class_names(classes: &[DiagramClass]) -> HashSet<&str> {
    classes.iter().map(|c| c.name.as_str()).collect()
}

/// Mermaid `classDiagram`
#[derive(Debug, Clone, Default)]
pub struct MermaidClassDiagram {
    directive: String,
    /// Class name to `click` target
    links: BTreeMap<String, String>,
}

impl MermaidClassDiagram {
    pub fn new(directive: &str) -> Self {
        Self {
            directive: directive.to_string(),
            links: BTreeMap::new(),
        }
    }

    pub fn with_links(mut self, links: BTreeMap<String, String>) -> Self {
        self.links = links;
        self
    }
}

impl DiagramRenderer for MermaidClassDiagram {
    fn render(&self, view: &SchemaView, classes: &[&str]) -> String {
        let classes = collect_classes(view, classes);
        let present = class_names(&classes);
        let mut output = String::from("classDiagram\n");

        for class in &classes {
            let id = camelcase(&class.name);
            output.push_str(&format!("    class {}\n", id));
            if let Some(target) = self.links.get(&class.name) {
                output.push_str(&format!("    click {} href \"{}\"\n", id, target));
            }
        }

        for class in &classes {
            let id = camelcase(&class.name);
            if let Some(parent) = class.is_a.as_deref().filter(|p| present.contains(p)) {
                output.push_str(&format!("    {} <|-- {}\n", camelcase(parent), id));
            }
            for mixin in class.mixins.iter().filter(|m| present.contains(m.as_str())) {
                output.push_str(&format!("    {} <|.. {}\n", camelcase(mixin), id));
            }
            for slot in &class.slots {
                match class_range(&present, slot) {
                    Some(range) => output.push_str(&format!(
                        "    {} --> \"{}\" {} : {}\n",
                        id,
                        cardinality(slot),
                        camelcase(range),
                        underscore(&slot.name)
                    )),
                    None => output.push_str(&format!("    {} : {}\n", id, underscore(&slot.name))),
                }
            }
        }
        output
    }

    fn fence(&self) -> &str {
        &self.directive
    }
}

/// Mermaid `erDiagram`
#[derive(Debug, Clone, Default)]
pub struct MermaidErDiagram {
    directive: String,
}

impl MermaidErDiagram {
    pub fn new(directive: &str) -> Self {
        Self {
            directive: directive.to_string(),
        }
    }

    /// Crow's foot marker on the target side of a relationship
    fn target_marker(slot: &SlotDefinition) -> &'static str {
        match (slot.is_multivalued(), slot.is_required()) {
            (true, true) => "|{",
            (true, false) => "o{",
            (false, true) => "||",
            (false, false) => "|o",
        }
    }
}

impl DiagramRenderer for MermaidErDiagram {
    fn render(&self, view: &SchemaView, classes: &[&str]) -> String {
        let classes = collect_classes(view, classes);
        let present = class_names(&classes);
        let mut output = String::from("erDiagram\n");
        let mut relationships = Vec::new();

        for class in &classes {
            let id = camelcase(&class.name);
            let attributes: Vec<&SlotDefinition> = class
                .slots
                .iter()
                .filter(|slot| match class_range(&present, slot) {
                    Some(range) => {
                        relationships.push(format!(
                            "{} ||--{} {} : \"{}\"\n",
                            id,
                            Self::target_marker(slot),
                            camelcase(range),
                            underscore(&slot.name)
                        ));
                        false
                    }
                    None => true,
                })
                .collect();

            if attributes.is_empty() {
                output.push_str(&format!("{}\n", id));
                continue;
            }
            output.push_str(&format!("{} {{\n", id));
            for slot in attributes {
                let range = slot.range.as_deref().unwrap_or("string");
                output.push_str(&format!("    {} {}\n", underscore(range), underscore(&slot.name)));
            }
            output.push_str("}\n");
        }

        output.push('\n');
        for relationship in relationships {
            output.push_str(&relationship);
        }
        output
    }

    fn fence(&self) -> &str {
        &self.directive
    }
}

/// PlantUML class diagram
#[derive(Debug, Clone, Copy, Default)]
pub struct PlantUmlClassDiagram;

impl DiagramRenderer for PlantUmlClassDiagram {
    fn render(&self, view: &SchemaView, classes: &[&str]) -> String {
        let classes = collect_classes(view, classes);
        let present = class_names(&classes);
        let mut output = String::from("@startuml\nskinparam nodesep 10\nhide circle\nhide empty members\n");

        for class in &classes {
            let fields: Vec<&SlotDefinition> = class
                .slots
                .iter()
                .filter(|slot| class_range(&present, slot).is_none())
                .collect();
            if fields.is_empty() {
                output.push_str(&format!("class \"{}\"\n", class.name));
                continue;
            }
            output.push_str(&format!("class \"{}\" {{\n", class.name));
            for slot in fields {
                output.push_str(&format!(
                    "    {{field}} {} : {}\n",
                    slot.name,
                    slot.range.as_deref().unwrap_or("string")
                ));
            }
            output.push_str("}\n");
        }

        for class in &classes {
            if let Some(parent) = class.is_a.as_deref().filter(|p| present.contains(p)) {
                output.push_str(&format!("\"{}\" <|-- \"{}\"\n", parent, class.name));
            }
            for mixin in class.mixins.iter().filter(|m| present.contains(m.as_str())) {
                output.push_str(&format!("\"{}\" <|.. \"{}\"\n", mixin, class.name));
            }
            for slot in &class.slots {
                if let Some(range) = class_range(&present, slot) {
                    output.push_str(&format!(
                        "\"{}\" --> \"{}\" \"{}\" : \"{}\"\n",
                        class.name,
                        cardinality(slot),
                        range,
                        slot.name
                    ));
                }
            }
        }

        output.push_str("@enduml\n");
        output
    }

    fn fence(&self) -> &str {
        "plantuml"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{Format, SchemaLoader};
    use std::path::Path;

    const SCHEMA: &str = r#"
id: https://example.org/org
name: org
default_range: string
classes:
  NamedThing:
    attributes:
      name:
  Person:
    is_a: NamedThing
    attributes:
      age:
        range: integer
      employer:
        range: Organization
        required: true
  Organization:
    is_a: NamedThing
    attributes:
      members:
        range: Person
        multivalued: true
"#;

    fn view() -> SchemaView {
        SchemaLoader::new()
            .load_str(SCHEMA, Format::Yaml, Path::new("."))
            .unwrap()
    }

    #[test]
    fn test_mermaid_class_diagram() {
        let view = view();
        let links = BTreeMap::from([("Person".to_string(), "../Person/".to_string())]);
        let diagram = MermaidClassDiagram::new("mermaid").with_links(links);
        let output = diagram.render(&view, &["Person", "NamedThing", "Organization"]);

        assert!(output.starts_with("classDiagram\n"));
        assert!(output.contains("    class Person\n    click Person href \"../Person/\"\n"));
        assert!(output.contains("    NamedThing <|-- Person\n"));
        assert!(output.contains("    Person : age\n"));
        assert!(output.contains("    Person --> \"1\" Organization : employer\n"));
        assert!(output.contains("    Organization --> \"*\" Person : members\n"));
        assert_eq!(diagram.fence(), "mermaid");
    }

    #[test]
    fn test_edges_need_both_ends() {
        let view = view();
        let output = MermaidClassDiagram::new("mermaid").render(&view, &["Person"]);
        assert!(!output.contains("<|--"));
        assert!(!output.contains("click"));
        assert!(!output.contains("-->"));
        assert!(output.contains("    Person : employer\n"));

        let er = MermaidErDiagram::new("mermaid").render(&view, &["Organization"]);
        assert!(!er.contains("||--"));
        assert!(er.contains("Organization {\n    Person members\n}\n"));
    }

    #[test]
    fn test_er_diagram() {
        let view = view();
        let output = MermaidErDiagram::new("{mermaid}").render(&view, &[]);
        assert!(output.starts_with("erDiagram\n"));
        assert!(output.contains("Person {\n    integer age\n}\n"));
        assert!(output.contains("Person ||--|| Organization : \"employer\"\n"));
        assert!(output.contains("Organization ||--o{ Person : \"members\"\n"));
        assert!(output.contains("NamedThing {\n    string name\n}\n"));
    }

    #[test]
    fn test_plantuml_diagram() {
        let view = view();
        let output = PlantUmlClassDiagram.render(&view, &[]);
        assert!(output.starts_with("@startuml\n"));
        assert!(output.ends_with("@enduml\n"));
        assert!(output.contains("class \"Person\" {\n    {field} age : integer\n}\n"));
        assert!(output.contains("\"NamedThing\" <|-- \"Person\"\n"));
        assert!(output.contains("\"Person\" --> \"1\" \"Organization\" : \"employer\"\n"));
    }
}
