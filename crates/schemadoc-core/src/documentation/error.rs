//! Error types for documentation generation
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::loader::LoaderError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Generator error types
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// No output directory was configured
    #[error("Output directory must be provided")]
    MissingDirectory,

    #[error("Unsupported output format '{0}'. Expected markdown, rst, html or latex")]
    UnsupportedFormat(String),

    #[error("Invalid {what} '{value}'")]
    InvalidOption { what: &'static str, value: String },

    #[error("Template directory '{path}' does not exist")]
    TemplateDirectoryNotFound { path: PathBuf },

    #[error("Example directory '{path}' does not exist")]
    ExampleDirectoryNotFound { path: PathBuf },

    /// Required templates resolved neither from the template directory nor the built-ins
    #[error("No {format} template for {kinds} (searched: {searched})")]
    MissingTemplate {
        kinds: String,
        format: String,
        searched: String,
    },

    #[error("Failed to load templates from '{path}': {source}")]
    TemplateLoad {
        path: PathBuf,
        source: tera::Error,
    },

    #[error("Failed to render template '{template}': {source}")]
    Render {
        template: String,
        source: tera::Error,
    },

    #[error("Failed to serialize '{element}' as YAML: {source}")]
    Yaml {
        element: String,
        source: serde_yaml::Error,
    },

    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Load(#[from] LoaderError),
}

impl GeneratorError {
    pub fn invalid_option(what: &'static str, value: &str) -> Self {
        Self::InvalidOption {
            what,
            value: value.to_string(),
        }
    }

    pub fn io_error(path: PathBuf, source: std::io::Error) -> Self {
        Self::Io { path, source }
    }

    pub fn render_error(template: impl Into<String>, source: tera::Error) -> Self {
        Self::Render {
            template: template.into(),
            source,
        }
    }

    /// Configuration errors are detected before any document is written
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::MissingDirectory
                | Self::UnsupportedFormat(_)
                | Self::InvalidOption { .. }
                | Self::TemplateDirectoryNotFound { .. }
                | Self::ExampleDirectoryNotFound { .. }
                | Self::MissingTemplate { .. }
                | Self::TemplateLoad { .. }
        )
    }
}
