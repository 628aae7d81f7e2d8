//! Error types and handling for the CLI
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use schemadoc_core::GeneratorError;
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument combination
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("{message}")]
    Other { message: String },
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Generator(e) if e.is_config_error() => 5,
            Self::Generator(GeneratorError::Load(_)) => 3,
            Self::Generator(_) => 2,
            Self::FileNotFound { .. } => 3,
            Self::Config(_) => 5,
            Self::InvalidArgs(_) => 6,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::TomlParse(_) | Self::TomlWrite(_) => 14,
            Self::Other { .. } => 99,
        }
    }

    /// Whether usage help should follow the error message
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidArgs(_))
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::Generator(GeneratorError::MissingDirectory).exit_code(), 5);
        assert_eq!(Error::FileNotFound { path: PathBuf::from("x.yaml") }.exit_code(), 3);
        assert_eq!(Error::config("bad").exit_code(), 5);
        assert_eq!(
            Error::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied")).exit_code(),
            1
        );
        assert!(Error::invalid_args("conflict").should_show_help());
        assert!(!Error::other("boom").should_show_help());
    }

    #[test]
    fn test_format_error_plain() {
        let err = Error::FileNotFound {
            path: PathBuf::from("schema.yaml"),
        };
        assert_eq!(format_error(&err, false), "Error: File not found: schema.yaml");
    }
}
