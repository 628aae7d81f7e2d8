//! Inheritance outlines
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::documentation::generator::DocGenerator;
use crate::model::{Element, ElementKind};
use std::collections::HashSet;

/// Spaces of indentation per depth level
const INDENT_WIDTH: usize = 4;

/// One line of an inheritance outline
#[derive(Debug, Clone, Copy)]
pub struct HierarchyNode<'a> {
    pub name: &'a str,
    /// `None` when the name does not resolve to an element
    pub element: Option<Element<'a>>,
    pub depth: usize,
}

impl DocGenerator {
    /// Nested bullet outline from the root ancestor down to `element`.
    ///
    /// The focus element is bold and every other node is a link. With
    /// `children`, direct children are listed one level below the focus.
    pub fn inheritance_tree(&self, element: &Element<'_>, children: bool, mixins: bool) -> String {
        let chain = self.ancestor_chain(element);
        let focus = element.name();
        let focus_depth = chain.len().saturating_sub(1);

        let mut tree: String = chain
            .iter()
            .map(|node| self.tree_line(node, mixins, focus))
            .collect();

        if children {
            let child_names = match element.kind() {
                ElementKind::Class => self.view.class_children(focus, false, true),
                ElementKind::Slot => self.view.slot_children(focus, false),
                _ => Vec::new(),
            };
            for name in child_names {
                let node = HierarchyNode {
                    name,
                    element: self.view.get_element_of_kind(element.kind(), name),
                    depth: focus_depth + 1,
                };
                tree.push_str(&self.tree_line(&node, mixins, focus));
            }
        }
        tree
    }

    /// Root-first `is_a` chain ending at `element`
    pub fn ancestor_chain<'a>(&'a self, element: &Element<'a>) -> Vec<HierarchyNode<'a>> {
        let mut chain = vec![(element.name(), Some(*element))];
        let mut seen = HashSet::from([element.name()]);
        let mut parent = element.is_a();

        while let Some(name) = parent {
            if !seen.insert(name) {
                break;
            }
            let resolved = self.view.get_element_of_kind(element.kind(), name);
            chain.push((name, resolved));
            parent = resolved.and_then(|e| e.is_a());
        }

        chain
            .into_iter()
            .rev()
            .enumerate()
            .map(|(depth, (name, element))| HierarchyNode {
                name,
                element,
                depth,
            })
            .collect()
    }

    fn tree_line(&self, node: &HierarchyNode<'_>, mixins: bool, focus: &str) -> String {
        let indent = " ".repeat(node.depth * INDENT_WIDTH);
        let Some(element) = node.element else {
            return format!("{}* {}\n", indent, node.name);
        };

        let label = if node.name == focus {
            let name = if self.config.use_slot_uris || self.config.use_class_uris {
                element.name().to_string()
            } else {
                self.name(&element)
            };
            format!("**{}**", name)
        } else {
            self.link(element, false)
        };

        let mut line = format!("{}* {}", indent, label);
        if mixins && !element.mixins().is_empty() {
            line.push_str(" [");
            for mixin in element.mixins() {
                line.push(' ');
                line.push_str(&self.link(mixin, false));
            }
            line.push(']');
        }
        line.push('\n');
        line
    }

    /// Pre-order `(depth, class)` listing of every class, siblings sorted case-insensitively
    pub fn class_hierarchy_as_tuples(&self) -> Vec<(usize, String)> {
        let imports = self.config.render_imports;
        let mut roots = self.view.class_roots(false, imports);
        roots.sort_by_key(|name| std::cmp::Reverse(name.to_lowercase()));

        let mut stack: Vec<(usize, &str)> = roots.into_iter().map(|r| (0, r)).collect();
        let mut visited = HashSet::new();
        let mut tuples = Vec::new();

        while let Some((depth, name)) = stack.pop() {
            if !visited.insert(name) {
                continue;
            }
            tuples.push((depth, name.to_string()));

            let mut children = self.view.class_children(name, false, imports);
            children.sort_by_key(|child| std::cmp::Reverse(child.to_lowercase()));
            stack.extend(children.into_iter().map(|child| (depth + 1, child)));
        }
        tuples
    }
}
