//! Schema document parsing for YAML and JSON formats
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use crate::loader::document::SchemaDocument;
use crate::loader::error::{LoaderError, LoaderResult};
use std::path::Path;

/// Supported file formats for schema documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
        }
    }
}

/// Parse a schema document file, detecting format from extension
pub fn parse_file(path: &Path) -> LoaderResult<SchemaDocument> {
    let format = Format::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

    parse_content(&content, format, path)
}

/// Parse schema document content with an explicit format.
///
/// `path` is only used for error context.
pub fn parse_content(content: &str, format: Format, path: &Path) -> LoaderResult<SchemaDocument> {
    match format {
        Format::Yaml => serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e)),
        Format::Json => serde_json::from_str(content)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e)),
    }
}
