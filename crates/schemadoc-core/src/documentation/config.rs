//! Generator configuration
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::documentation::error::{GeneratorError, GeneratorResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Rst,
    Html,
    Latex,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Markdown,
        OutputFormat::Rst,
        OutputFormat::Html,
        OutputFormat::Latex,
    ];

    /// Extension of generated files and the middle part of template names
    pub fn suffix(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Rst => "rst",
            OutputFormat::Html => "html",
            OutputFormat::Latex => "tex",
        }
    }

    /// Single-file formats only produce the index document
    pub fn is_single_file(&self) -> bool {
        matches!(self, OutputFormat::Latex)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Rst => "rst",
            OutputFormat::Html => "html",
            OutputFormat::Latex => "latex",
        }
    }

    /// Hyperlink in this format's markup
    pub fn hyperlink(&self, text: &str, href: &str) -> String {
        match self {
            OutputFormat::Markdown => format!("[{}]({})", text, href),
            OutputFormat::Rst => format!("`{} <{}>`__", text, href),
            OutputFormat::Html => format!("<a href=\"{}\">{}</a>", href, text),
            OutputFormat::Latex => text.to_string(),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "rst" => Ok(OutputFormat::Rst),
            "html" => Ok(OutputFormat::Html),
            "latex" | "tex" => Ok(OutputFormat::Latex),
            _ => Err(GeneratorError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Markdown flavour, which decides how diagrams are fenced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkdownDialect {
    /// Python-Markdown, as used by mkdocs
    Python,
    /// MyST, as used by sphinx
    Myst,
}

impl FromStr for MarkdownDialect {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" => Ok(MarkdownDialect::Python),
            "myst" => Ok(MarkdownDialect::Myst),
            _ => Err(GeneratorError::invalid_option("dialect", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramType {
    MermaidClassDiagram,
    PlantumlClassDiagram,
    ErDiagram,
}

impl DiagramType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramType::MermaidClassDiagram => "mermaid_class_diagram",
            DiagramType::PlantumlClassDiagram => "plantuml_class_diagram",
            DiagramType::ErDiagram => "er_diagram",
        }
    }
}

impl FromStr for DiagramType {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mermaid_class_diagram" => Ok(DiagramType::MermaidClassDiagram),
            "plantuml_class_diagram" => Ok(DiagramType::PlantumlClassDiagram),
            "er_diagram" => Ok(DiagramType::ErDiagram),
            _ => Err(GeneratorError::invalid_option("diagram type", s)),
        }
    }
}

/// Ordering of element lists on generated pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Name,
    Rank,
    Title,
}

impl FromStr for SortBy {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortBy::Name),
            "rank" => Ok(SortBy::Rank),
            "title" => Ok(SortBy::Title),
            _ => Err(GeneratorError::invalid_option("sort key", s)),
        }
    }
}

/// Documentation generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory documents are written to
    pub directory: Option<PathBuf>,
    pub format: OutputFormat,
    /// Base name of the index document
    pub index_name: String,
    /// Directory holding `<kind>.<suffix>.tera` overrides
    pub template_directory: Option<PathBuf>,
    /// Directory of example data files named `<Class>-<label>.yaml` or `.json`
    pub example_directory: Option<PathBuf>,
    pub dialect: Option<MarkdownDialect>,
    pub diagram_type: Option<DiagramType>,
    /// Whether the index page includes a diagram of the whole schema
    pub include_top_level_diagram: bool,
    pub sort_by: SortBy,
    /// Separate pages into one subfolder per element kind
    pub subfolder_type_separation: bool,
    /// Cut long descriptions down to their first sentence in tables
    pub truncate_descriptions: bool,
    pub use_slot_uris: bool,
    pub use_class_uris: bool,
    pub hierarchical_class_view: bool,
    /// List imported elements on the index page
    pub render_imports: bool,
    /// Treat the built-in types as part of the schema being documented
    pub genmeta: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            directory: None,
            format: OutputFormat::Markdown,
            index_name: "index".to_string(),
            template_directory: None,
            example_directory: None,
            dialect: None,
            diagram_type: None,
            include_top_level_diagram: false,
            sort_by: SortBy::Name,
            subfolder_type_separation: false,
            truncate_descriptions: true,
            use_slot_uris: false,
            use_class_uris: false,
            hierarchical_class_view: false,
            render_imports: false,
            genmeta: false,
        }
    }
}

impl GeneratorConfig {
    /// Configuration writing to `directory` with every other option at its default
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
            ..Default::default()
        }
    }

    /// Report configuration problems that must stop a run before anything is written
    pub fn validate(&self) -> GeneratorResult<()> {
        if self.directory.is_none() {
            return Err(GeneratorError::MissingDirectory);
        }
        if self.index_name.trim().is_empty() {
            return Err(GeneratorError::invalid_option("index name", &self.index_name));
        }
        if let Some(dir) = &self.template_directory {
            if !dir.is_dir() {
                return Err(GeneratorError::TemplateDirectoryNotFound { path: dir.clone() });
            }
        }
        if let Some(dir) = &self.example_directory {
            if !dir.is_dir() {
                return Err(GeneratorError::ExampleDirectoryNotFound { path: dir.clone() });
            }
        }
        Ok(())
    }

    /// Fence keyword for mermaid blocks
    pub fn mermaid_directive(&self) -> &'static str {
        match self.dialect {
            Some(MarkdownDialect::Myst) => "{mermaid}",
            _ => "mermaid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing_and_suffixes() {
        assert_eq!("markdown".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("LaTeX".parse::<OutputFormat>().unwrap(), OutputFormat::Latex);
        assert_eq!(OutputFormat::Markdown.suffix(), "md");
        assert_eq!(OutputFormat::Latex.suffix(), "tex");
        assert_eq!(OutputFormat::Html.suffix(), "html");
        assert!(OutputFormat::Latex.is_single_file());
        assert!(!OutputFormat::Rst.is_single_file());

        let err = "docx".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, GeneratorError::UnsupportedFormat(ref f) if f == "docx"));
    }

    #[test]
    fn test_hyperlink_markup() {
        assert_eq!(OutputFormat::Markdown.hyperlink("Person", "Person.md"), "[Person](Person.md)");
        assert_eq!(
            OutputFormat::Html.hyperlink("Person", "Person.html"),
            "<a href=\"Person.html\">Person</a>"
        );
        assert_eq!(OutputFormat::Rst.hyperlink("Person", "Person.rst"), "`Person <Person.rst>`__");
        assert_eq!(OutputFormat::Latex.hyperlink("Person", "Person.tex"), "Person");
    }

    #[test]
    fn test_validate() {
        assert!(matches!(
            GeneratorConfig::default().validate(),
            Err(GeneratorError::MissingDirectory)
        ));

        let dir = tempfile::tempdir().unwrap();
        let mut config = GeneratorConfig::new(dir.path());
        assert!(config.validate().is_ok());

        config.template_directory = Some(dir.path().join("absent"));
        assert!(matches!(
            config.validate(),
            Err(GeneratorError::TemplateDirectoryNotFound { .. })
        ));

        config.template_directory = None;
        config.example_directory = Some(dir.path().join("examples"));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, GeneratorError::ExampleDirectoryNotFound { .. }));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_mermaid_directive() {
        let mut config = GeneratorConfig::default();
        assert_eq!(config.mermaid_directive(), "mermaid");
        config.dialect = Some(MarkdownDialect::Myst);
        assert_eq!(config.mermaid_directive(), "{mermaid}");
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: GeneratorConfig = serde_json::from_value(serde_json::json!({
            "format": "html",
            "diagram_type": "er_diagram",
            "subfolder_type_separation": true
        }))
        .unwrap();
        assert_eq!(config.format, OutputFormat::Html);
        assert_eq!(config.diagram_type, Some(DiagramType::ErDiagram));
        assert!(config.subfolder_type_separation);
        assert_eq!(config.index_name, "index");
        assert!(config.truncate_descriptions);
    }
}
