//! Cross-references between generated pages
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::documentation::generator::DocGenerator;
use crate::model::{Element, ElementKind, TypeDefinition, LINKML_NAMESPACE, LINKML_TYPES_ID};

/// Placeholder rendered for an absent reference
pub const NONE_LINK: &str = "NONE";

/// Something a link can point at
#[derive(Debug, Clone, Copy)]
pub enum LinkTarget<'a> {
    Element(Element<'a>),
    Name(&'a str),
    None,
}

impl<'a> From<Element<'a>> for LinkTarget<'a> {
    fn from(element: Element<'a>) -> Self {
        LinkTarget::Element(element)
    }
}

impl<'a> From<&'a str> for LinkTarget<'a> {
    fn from(name: &'a str) -> Self {
        LinkTarget::Name(name)
    }
}

impl<'a> From<&'a String> for LinkTarget<'a> {
    fn from(name: &'a String) -> Self {
        LinkTarget::Name(name.as_str())
    }
}

impl<'a> From<Option<&'a str>> for LinkTarget<'a> {
    fn from(name: Option<&'a str>) -> Self {
        name.map_or(LinkTarget::None, LinkTarget::Name)
    }
}

/// `[display](<subfolder>/<n>.md)`, where display defaults to `n`
pub fn markdown_link(n: &str, name: Option<&str>, subfolder: Option<&str>) -> String {
    let rel_path = match subfolder {
        Some(folder) if !folder.is_empty() => format!("{}/{}", folder, n),
        _ => n.to_string(),
    };
    format!("[{}]({}.md)", name.unwrap_or(n), rel_path)
}

impl DocGenerator {
    /// Built-in types belong to the metamodel unless the metamodel itself is documented
    pub fn is_external(&self, element: &Element<'_>) -> bool {
        element.from_schema() == Some(LINKML_TYPES_ID) && !self.config.genmeta
    }

    /// External types still get pages when documenting a schema in the LinkML namespace
    pub fn exclude_type(&self, ty: &TypeDefinition) -> bool {
        self.is_external(&Element::Type(ty)) && !self.view.schema().id.starts_with(LINKML_NAMESPACE)
    }

    /// Whether an element gets a page of its own
    pub fn has_page(&self, element: &Element<'_>) -> bool {
        match element {
            Element::Type(ty) => !self.exclude_type(ty),
            other => !self.is_external(other),
        }
    }

    /// Folder holding pages of `kind`, relative to the page a link appears on
    pub(crate) fn kind_folder(&self, kind: ElementKind, index_link: bool) -> Option<String> {
        if !self.config.subfolder_type_separation {
            return None;
        }
        if index_link {
            Some(kind.subfolder().to_string())
        } else {
            Some(format!("../{}", kind.subfolder()))
        }
    }

    /// Relative path of an element's page without the file suffix
    pub(crate) fn page_path(&self, element: &Element<'_>, index_link: bool) -> String {
        let n = self.name(element);
        match self.kind_folder(element.kind(), index_link) {
            Some(folder) => format!("{}/{}", folder, n),
            None => n,
        }
    }

    /// Hyperlink to an element's page.
    ///
    /// External elements link to their URI. Names that do not resolve render
    /// as the raw name and an absent reference renders as `NONE`.
    pub fn link<'a>(&'a self, target: impl Into<LinkTarget<'a>>, index_link: bool) -> String {
        let element = match target.into() {
            LinkTarget::None => return NONE_LINK.to_string(),
            LinkTarget::Element(element) => element,
            LinkTarget::Name(name) => match self.view.get_element(name) {
                Some(element) => element,
                None => return name.to_string(),
            },
        };

        if self.is_external(&element) {
            return self.uri_link(&element);
        }

        let display = match self.uri_name(&element) {
            Some(_) => element.name().to_string(),
            None => self.name(&element),
        };
        let href = format!(
            "{}.{}",
            self.page_path(&element, index_link),
            self.config.format.suffix()
        );
        self.config.format.hyperlink(&display, &href)
    }

    /// Links for a list of names, as seen from an element page
    pub fn links<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        names.iter().map(|n| self.link(n.as_ref(), false)).collect()
    }

    /// Target of a mermaid `click` directive
    pub fn link_mermaid<'a>(&'a self, target: impl Into<LinkTarget<'a>>) -> String {
        let element = match target.into() {
            LinkTarget::None => return NONE_LINK.to_string(),
            LinkTarget::Element(element) => element,
            LinkTarget::Name(name) => match self.view.get_element(name) {
                Some(element) => element,
                None => return name.to_string(),
            },
        };
        if self.is_external(&element) {
            return self.uri(&element, true);
        }
        format!("../{}/", self.page_path(&element, false))
    }

    /// URI of an element; subsets have none and use their name
    pub fn uri(&self, element: &Element<'_>, expand: bool) -> String {
        if element.kind() == ElementKind::Subset {
            return self.name(element);
        }
        self.view
            .get_uri(element, expand, self.config.subfolder_type_separation)
    }

    /// `[curie](expanded uri)` for an element
    pub fn uri_link(&self, element: &Element<'_>) -> String {
        let uri = self.uri(element, true);
        let curie = self.uri(element, false);
        self.config.format.hyperlink(&curie, &uri)
    }

    /// `[curie](expanded uri)` for a bare CURIE
    pub fn curie_link(&self, curie: &str) -> String {
        let uri = self.view.expand_curie(curie);
        self.config.format.hyperlink(curie, &uri)
    }
}
