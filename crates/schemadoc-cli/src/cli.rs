//! Command-line interface argument parsing and definitions
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use schemadoc_core::documentation::{DiagramType, MarkdownDialect, OutputFormat, SortBy};
use std::path::PathBuf;

/// Schemadoc - documentation sites from LinkML schemas
///
/// Generates one page per class, slot, enum, type and subset of a schema
/// and its imports, plus an index page.
#[derive(Parser, Debug)]
#[command(
    name = "schemadoc",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SCHEMADOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Format of reports printed to stdout
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: ReportFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate documentation for a schema
    Generate(GenerateArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the generate command
///
/// Flags override values from the configuration file.
#[derive(Parser, Debug, Default)]
pub struct GenerateArgs {
    /// Path to the schema file (YAML or JSON)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Directory documents are written to
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Document format
    #[arg(short, long, value_enum)]
    pub format: Option<DocFormat>,

    /// Directory of override templates named `<kind>.<suffix>.tera`
    #[arg(long, value_name = "DIR")]
    pub template_directory: Option<PathBuf>,

    /// Directory of example data files named `<Class>-<label>.yaml`
    #[arg(long, value_name = "DIR")]
    pub example_directory: Option<PathBuf>,

    /// File stem of the index page
    #[arg(long)]
    pub index_name: Option<String>,

    /// Markdown dialect
    #[arg(long, value_enum)]
    pub dialect: Option<Dialect>,

    /// Diagram embedded in class pages
    #[arg(long, value_enum)]
    pub diagram_type: Option<Diagram>,

    /// Embed a diagram of all classes in the index page
    #[arg(long)]
    pub include_top_level_diagram: bool,

    /// Ordering of element lists
    #[arg(long, value_enum)]
    pub sort_by: Option<SortKey>,

    /// Write each element kind into its own subfolder
    #[arg(long)]
    pub subfolder_type_separation: bool,

    /// Keep descriptions in tables at full length
    #[arg(long)]
    pub no_truncate_descriptions: bool,

    /// Name slot pages after their slot URI
    #[arg(long)]
    pub use_slot_uris: bool,

    /// Name class pages after their class URI
    #[arg(long)]
    pub use_class_uris: bool,

    /// List classes on the index page as an inheritance hierarchy
    #[arg(long)]
    pub hierarchical_class_view: bool,

    /// List imported elements on the index page
    #[arg(long)]
    pub render_imports: bool,

    /// Document the metamodel itself, including built-in types
    #[arg(long)]
    pub genmeta: bool,

    /// Print the document plan without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default project configuration file
    Init(ConfigInitArgs),

    /// Show the merged configuration
    Show(ConfigShowArgs),
}

#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file (defaults to .schemadoc.toml)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Force overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Report output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable formatted output
    Human,
    Json,
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DocFormat {
    Markdown,
    Rst,
    Html,
    Latex,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Dialect {
    Python,
    Myst,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Diagram {
    MermaidClassDiagram,
    PlantumlClassDiagram,
    ErDiagram,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Name,
    Rank,
    Title,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Effective verbosity level, zero when quiet
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl From<DocFormat> for OutputFormat {
    fn from(format: DocFormat) -> Self {
        match format {
            DocFormat::Markdown => OutputFormat::Markdown,
            DocFormat::Rst => OutputFormat::Rst,
            DocFormat::Html => OutputFormat::Html,
            DocFormat::Latex => OutputFormat::Latex,
        }
    }
}

impl From<Dialect> for MarkdownDialect {
    fn from(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Python => MarkdownDialect::Python,
            Dialect::Myst => MarkdownDialect::Myst,
        }
    }
}

impl From<Diagram> for DiagramType {
    fn from(diagram: Diagram) -> Self {
        match diagram {
            Diagram::MermaidClassDiagram => DiagramType::MermaidClassDiagram,
            Diagram::PlantumlClassDiagram => DiagramType::PlantumlClassDiagram,
            Diagram::ErDiagram => DiagramType::ErDiagram,
        }
    }
}

impl From<SortKey> for SortBy {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Name => SortBy::Name,
            SortKey::Rank => SortBy::Rank,
            SortKey::Title => SortBy::Title,
        }
    }
}

impl Shell {
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_flags() {
        let cli = Cli::parse_from([
            "schemadoc",
            "-vv",
            "generate",
            "schema.yaml",
            "-d",
            "docs",
            "--format",
            "html",
            "--diagram-type",
            "er-diagram",
            "--subfolder-type-separation",
        ]);
        assert_eq!(cli.verbosity_level(), 2);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.schema, PathBuf::from("schema.yaml"));
                assert_eq!(args.directory, Some(PathBuf::from("docs")));
                assert_eq!(args.format, Some(DocFormat::Html));
                assert_eq!(args.diagram_type, Some(Diagram::ErDiagram));
                assert!(args.subfolder_type_separation);
                assert!(!args.genmeta);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_quiet_zeroes_verbosity() {
        let cli = Cli::parse_from(["schemadoc", "--quiet", "generate", "schema.yaml"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(OutputFormat::from(DocFormat::Latex), OutputFormat::Latex);
        assert_eq!(MarkdownDialect::from(Dialect::Myst), MarkdownDialect::Myst);
        assert_eq!(SortBy::from(SortKey::Rank), SortBy::Rank);
        assert_eq!(
            DiagramType::from(Diagram::PlantumlClassDiagram),
            DiagramType::PlantumlClassDiagram
        );
    }
}
