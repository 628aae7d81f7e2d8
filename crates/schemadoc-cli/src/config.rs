//! Configuration management for the CLI
//!
//! Configuration is layered: built-in defaults, then the first configuration
//! file found, then command-line flags. Files can be TOML, YAML or JSON.
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use schemadoc_core::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration file written by `config init`
pub const PROJECT_CONFIG_FILE: &str = ".schemadoc.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generator options, overridden by `generate` flags
    pub generator: GeneratorConfig,
    pub output: OutputConfig,
    pub logging: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output by default
    pub color: bool,
    /// Show progress indicators
    pub progress: bool,
}

/// Logging settings; environment variables take precedence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,
    /// Log format (compact, full, json)
    pub format: Option<String>,
    pub file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            progress: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Yaml,
    Json,
}

impl FileFormat {
    fn of(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(Error::config(format!(
                "Unsupported config file format: {}",
                path.display()
            ))),
        }
    }
}

impl Config {
    /// Load configuration from a file, choosing the parser by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config = match FileFormat::of(path)? {
            FileFormat::Toml => toml::from_str(&content)?,
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
        };
        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load the first configuration file found in the default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        tracing::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Project files first, then the user config directory
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(PROJECT_CONFIG_FILE),
            PathBuf::from(".schemadoc.yaml"),
            PathBuf::from(".schemadoc.json"),
        ];

        if let Some(config_dir) = Self::user_config_dir() {
            paths.push(config_dir.join("config.toml"));
            paths.push(config_dir.join("config.yaml"));
            paths.push(config_dir.join("config.json"));
        }
        paths
    }

    /// `schemadoc` under the platform config directory
    pub fn user_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("schemadoc"))
    }

    /// Serialize in the format the extension names
    pub fn to_string_for(&self, path: &Path) -> Result<String> {
        Ok(match FileFormat::of(path)? {
            FileFormat::Toml => toml::to_string_pretty(self)?,
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_string_for(path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Defaults written by `config init`
    pub fn project_default() -> Self {
        Self {
            generator: GeneratorConfig::new("docs"),
            ..Default::default()
        }
    }
}
