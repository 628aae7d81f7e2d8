//! Configuration command handlers
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::{Config, PROJECT_CONFIG_FILE};
use crate::error::Result;
use crate::output::OutputWriter;
use std::path::PathBuf;

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
    }
}

fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let path = args.path.unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE));

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))?;
        return Ok(());
    }

    Config::project_default().save(&path)?;
    tracing::info!(path = %path.display(), "Wrote project configuration");
    output.success(&format!("✓ Created config at {}", path.display()))?;
    output.info("Edit it to customize documentation settings.")
}

fn handle_config_show(args: ConfigShowArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let content = match args.format {
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    output.writeln(content.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ReportFormat;
    use crate::output::test_support::writer;

    #[test]
    fn test_init_writes_project_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".schemadoc.toml");
        let (mut output, buffer) = writer(ReportFormat::Human, false);

        let args = ConfigInitArgs {
            path: Some(path.clone()),
            force: false,
        };
        handle_config_init(args, &mut output).unwrap();

        assert_eq!(Config::from_file(&path).unwrap(), Config::project_default());
        assert!(buffer.contents().starts_with("✓ Created config at"));
    }

    #[test]
    fn test_init_keeps_existing_file_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[output]\ncolor = false\n").unwrap();
        let (mut output, buffer) = writer(ReportFormat::Human, false);

        let args = ConfigInitArgs {
            path: Some(path.clone()),
            force: false,
        };
        handle_config_init(args, &mut output).unwrap();
        assert!(buffer.contents().starts_with("WARNING: Config already exists"));
        assert!(!Config::from_file(&path).unwrap().output.color);

        let args = ConfigInitArgs {
            path: Some(path.clone()),
            force: true,
        };
        handle_config_init(args, &mut output).unwrap();
        assert!(Config::from_file(&path).unwrap().output.color);
    }

    #[test]
    fn test_show_formats() {
        let config = Config::project_default();

        let (mut output, buffer) = writer(ReportFormat::Human, false);
        handle_config_show(ConfigShowArgs { format: ConfigFormat::Json }, &config, &mut output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(value["generator"]["directory"], "docs");
        assert_eq!(value["generator"]["format"], "markdown");

        let (mut output, buffer) = writer(ReportFormat::Human, false);
        handle_config_show(ConfigShowArgs { format: ConfigFormat::Toml }, &config, &mut output).unwrap();
        let parsed: Config = toml::from_str(&buffer.contents()).unwrap();
        assert_eq!(parsed, config);
    }
}
