//! Canonical element names
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::documentation::generator::DocGenerator;
use crate::model::{Element, ElementKind};
use regex::Regex;
use std::sync::OnceLock;

static WORD_SEPARATOR: OnceLock<Regex> = OnceLock::new();
static NON_WORD_RUN: OnceLock<Regex> = OnceLock::new();

/// `has employment history` -> `HasEmploymentHistory`.
///
/// Non-alphanumeric characters separate words; each word gets an upper-case
/// first character and keeps the rest of its casing.
pub fn camelcase(text: &str) -> String {
    let separator = WORD_SEPARATOR.get_or_init(|| Regex::new(r"[^\p{L}\p{N}]+").unwrap());
    separator
        .split(text)
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// `has employment history` -> `has_employment_history`
pub fn underscore(text: &str) -> String {
    let run = NON_WORD_RUN.get_or_init(|| Regex::new(r"[^\w]+").unwrap());
    run.replace_all(text, "_").into_owned()
}

impl DocGenerator {
    /// Canonical display name, also the file stem of the element's page
    pub fn name(&self, element: &Element<'_>) -> String {
        if let Some(local) = self.uri_name(element) {
            return local;
        }
        match element.kind() {
            ElementKind::Slot => underscore(element.name()),
            _ => camelcase(element.name()),
        }
    }

    /// Local part of the element's CURIE when URI naming is enabled for its kind
    pub(crate) fn uri_name(&self, element: &Element<'_>) -> Option<String> {
        let enabled = match element.kind() {
            ElementKind::Class => self.config.use_class_uris,
            ElementKind::Slot => self.config.use_slot_uris,
            _ => false,
        };
        if !enabled {
            return None;
        }
        let curie = self.view.get_uri(element, false, false);
        curie
            .split_once(':')
            .map(|(_, local)| local.to_string())
            .filter(|local| !local.is_empty() && !local.starts_with("//"))
    }

    /// Schema title, falling back to its name
    pub fn schema_title(&self) -> &str {
        let schema = self.view.schema();
        schema.title.as_deref().unwrap_or(&schema.name)
    }
}
