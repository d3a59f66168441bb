//! Error types for schema document loading
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors raised while loading a schema document
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

    /// A document entry is malformed
    #[error("Validation failed for '{path}': {reason}")]
    ValidationError { path: PathBuf, reason: String },

    /// A declaration was rejected by the schema
    #[error("Invalid schema declaration in '{path}': {source}")]
    SchemaError {
        path: PathBuf,
        source: reshape_core::Error,
    },
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

    /// Create a validation error
    pub fn validation_error(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            path,
            reason: reason.into(),
        }
    }

    /// Create a schema declaration error
    pub fn schema_error(path: PathBuf, error: reshape_core::Error) -> Self {
        Self::SchemaError {
            path,
            source: error,
        }
    }
}
