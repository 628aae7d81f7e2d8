//! Error types for schema loading operations
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Error types for schema loading operations
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// Import resolution errors
    #[error("Failed to resolve import '{reference}' in '{source_path}': {reason}")]
    ReferenceError {
        reference: String,
        source_path: PathBuf,
        reason: String,
    },

    /// Import nesting deeper than the configured limit
    #[error("Import depth limit of {limit} exceeded: {chain}")]
    DepthExceeded { limit: usize, chain: String },

    /// Structural problems with a schema document
    #[error("Validation failed for '{path}': {reason}")]
    ValidationError { path: PathBuf, reason: String },
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: PathBuf, error: std::io::Error) -> Self {
        Self::IoError {
            path,
            source: error,
        }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: PathBuf, error: serde_yaml::Error) -> Self {
        Self::YamlParseError {
            path,
            source: error,
        }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: PathBuf, error: serde_json::Error) -> Self {
        Self::JsonParseError {
            path,
            source: error,
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(path: PathBuf) -> Self {
        Self::UnsupportedFormat { path }
    }

    /// Create an import resolution error
    pub fn reference_error(reference: String, source_path: PathBuf, reason: String) -> Self {
        Self::ReferenceError {
            reference,
            source_path,
            reason,
        }
    }

    /// Create a depth error from the chain of schemas being imported
    pub fn depth_exceeded(limit: usize, chain: &[PathBuf]) -> Self {
        let chain = chain
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        Self::DepthExceeded { limit, chain }
    }

    /// Create a validation error
    pub fn validation_error(path: PathBuf, reason: String) -> Self {
        Self::ValidationError { path, reason }
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::IoError { path, .. } => Some(path),
            Self::YamlParseError { path, .. } => Some(path),
            Self::JsonParseError { path, .. } => Some(path),
            Self::UnsupportedFormat { path } => Some(path),
            Self::ReferenceError { source_path, .. } => Some(source_path),
            Self::ValidationError { path, .. } => Some(path),
            Self::DepthExceeded { .. } => None,
        }
    }
}
