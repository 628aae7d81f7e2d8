//! Generate command handler
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use schemadoc_core::{DocGenerator, GeneratorConfig};
use tracing::{debug, info};

/// Handle the generate command
pub fn handle_generate(args: GenerateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    if !args.schema.exists() {
        return Err(Error::FileNotFound {
            path: args.schema.clone(),
        });
    }

    let generator_config = merge_generator_config(&config.generator, &args);
    if generator_config.include_top_level_diagram && generator_config.diagram_type.is_none() {
        return Err(Error::invalid_args(
            "--include-top-level-diagram needs a diagram type (--diagram-type or generator.diagram_type)",
        ));
    }
    debug!(config = ?generator_config, "Effective generator configuration");

    let generator = {
        let _timer = Timer::new("schema_loading");
        info!(schema = %args.schema.display(), "Loading schema");
        DocGenerator::from_path(&args.schema, generator_config)?
    };

    if args.dry_run {
        return output.plan(&generator.plan());
    }

    output.info(&format!("Generating documentation for {}", args.schema.display()))?;
    let spinner = output.spinner("Rendering documents...");
    let result = {
        let timer = Timer::new("documentation_generation");
        let result = generator.serialize();
        debug!(elapsed_ms = timer.elapsed().as_millis() as u64, "Rendering finished");
        result
    };
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    output.report(&result?)
}

/// Overlay command-line flags on the configured generator options.
///
/// Valued flags replace the configured value; switches only turn an option on,
/// except `--no-truncate-descriptions` which turns truncation off.
pub fn merge_generator_config(base: &GeneratorConfig, args: &GenerateArgs) -> GeneratorConfig {
    let mut config = base.clone();

    if let Some(directory) = &args.directory {
        config.directory = Some(directory.clone());
    }
    if let Some(format) = args.format {
        config.format = format.into();
    }
    if let Some(dir) = &args.template_directory {
        config.template_directory = Some(dir.clone());
    }
    if let Some(dir) = &args.example_directory {
        config.example_directory = Some(dir.clone());
    }
    if let Some(index_name) = &args.index_name {
        config.index_name = index_name.clone();
    }
    if let Some(dialect) = args.dialect {
        config.dialect = Some(dialect.into());
    }
    if let Some(diagram) = args.diagram_type {
        config.diagram_type = Some(diagram.into());
    }
    if let Some(sort_by) = args.sort_by {
        config.sort_by = sort_by.into();
    }

    config.include_top_level_diagram |= args.include_top_level_diagram;
    config.subfolder_type_separation |= args.subfolder_type_separation;
    config.use_slot_uris |= args.use_slot_uris;
    config.use_class_uris |= args.use_class_uris;
    config.hierarchical_class_view |= args.hierarchical_class_view;
    config.render_imports |= args.render_imports;
    config.genmeta |= args.genmeta;
    if args.no_truncate_descriptions {
        config.truncate_descriptions = false;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Diagram, DocFormat, ReportFormat, SortKey};
    use crate::output::test_support::writer;
    use schemadoc_core::{DiagramType, GeneratorError, OutputFormat, SortBy};
    use std::fs;
    use std::path::PathBuf;

    const SCHEMA: &str = r#"
id: https://example.org/zoo
name: zoo
classes:
  Animal:
    description: Any animal
  Dog:
    is_a: Animal
"#;

    fn args_for(schema: PathBuf) -> GenerateArgs {
        GenerateArgs {
            schema,
            ..Default::default()
        }
    }

    #[test]
    fn test_flags_override_config() {
        let mut base = GeneratorConfig::new("from-config");
        base.render_imports = true;

        let args = GenerateArgs {
            directory: Some(PathBuf::from("from-flag")),
            format: Some(DocFormat::Rst),
            example_directory: Some(PathBuf::from("samples")),
            diagram_type: Some(Diagram::ErDiagram),
            sort_by: Some(SortKey::Title),
            genmeta: true,
            no_truncate_descriptions: true,
            ..args_for(PathBuf::from("schema.yaml"))
        };

        let merged = merge_generator_config(&base, &args);
        assert_eq!(merged.directory, Some(PathBuf::from("from-flag")));
        assert_eq!(merged.format, OutputFormat::Rst);
        assert_eq!(merged.example_directory, Some(PathBuf::from("samples")));
        assert_eq!(merged.diagram_type, Some(DiagramType::ErDiagram));
        assert_eq!(merged.sort_by, SortBy::Title);
        assert!(merged.genmeta);
        assert!(merged.render_imports);
        assert!(!merged.truncate_descriptions);
        assert_eq!(merged.index_name, "index");
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let mut base = GeneratorConfig::new("docs");
        base.subfolder_type_separation = true;
        base.truncate_descriptions = false;

        let merged = merge_generator_config(&base, &args_for(PathBuf::from("schema.yaml")));
        assert_eq!(merged, base);
    }

    #[test]
    fn test_generate_writes_documents() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("zoo.yaml");
        fs::write(&schema, SCHEMA).unwrap();
        let out = dir.path().join("site");

        let args = GenerateArgs {
            directory: Some(out.clone()),
            ..args_for(schema)
        };
        let (mut output, buffer) = writer(ReportFormat::Json, false);
        handle_generate(args, &Config::default(), &mut output).unwrap();

        assert!(out.join("index.md").is_file());
        assert!(fs::read_to_string(out.join("Dog.md")).unwrap().contains("[Animal](Animal.md)"));
        let report: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(report["written"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("zoo.yaml");
        fs::write(&schema, SCHEMA).unwrap();
        let out = dir.path().join("site");

        let args = GenerateArgs {
            directory: Some(out.clone()),
            dry_run: true,
            ..args_for(schema)
        };
        let (mut output, buffer) = writer(ReportFormat::Human, false);
        handle_generate(args, &Config::default(), &mut output).unwrap();

        assert!(!out.exists());
        let printed = buffer.contents();
        assert!(printed.contains("=== Document Plan ==="));
        assert!(printed.contains("Dog.md"));
    }

    #[test]
    fn test_missing_schema_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let (mut output, _) = writer(ReportFormat::Human, true);

        let missing = args_for(dir.path().join("absent.yaml"));
        let err = handle_generate(missing, &Config::default(), &mut output).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));

        let schema = dir.path().join("zoo.yaml");
        fs::write(&schema, SCHEMA).unwrap();
        let err = handle_generate(args_for(schema), &Config::default(), &mut output).unwrap_err();
        assert!(matches!(err, Error::Generator(GeneratorError::MissingDirectory)));
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_top_level_diagram_needs_diagram_type() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("zoo.yaml");
        fs::write(&schema, SCHEMA).unwrap();
        let (mut output, _) = writer(ReportFormat::Human, true);

        let args = GenerateArgs {
            directory: Some(dir.path().join("site")),
            include_top_level_diagram: true,
            ..args_for(schema)
        };
        let err = handle_generate(args, &Config::default(), &mut output).unwrap_err();
        assert!(err.should_show_help());
    }
}
