//! Declarative schema documents
//!
//! A document lists attribute declarations in order. Each entry is applied
//! through the core declaration API, so the same rules hold as for schemas
//! declared in code: unknown cast tokens are rejected and the first
//! declaration of a name wins.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use reshape_core::{AttributeOptions, CastType, SchemaDefinition};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// A schema declared as data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    /// Cast applied to attributes without an explicit `type`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_type: Option<String>,
    /// Declarations in output order
    #[serde(default)]
    pub attributes: Vec<AttributeEntry>,
}

/// One declaration: a single `name` or a bulk `names` list with shared options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub cast_type: Option<String>,
    /// Dotted path into the input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Top-level key in the input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Capability name, falling back to the key of the same name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl AttributeEntry {
    fn label(&self) -> String {
        match (&self.name, &self.names) {
            (Some(name), _) => name.clone(),
            (None, Some(names)) => names.join(", "),
            (None, None) => "<unnamed>".to_string(),
        }
    }

    /// Names this entry declares, in order
    pub fn declared_names(&self, path: &Path) -> LoaderResult<Vec<String>> {
        match (&self.name, &self.names) {
            (Some(name), None) => Ok(vec![name.clone()]),
            (None, Some(names)) if !names.is_empty() => Ok(names.clone()),
            (None, Some(_)) => Err(LoaderError::validation_error(
                path.to_path_buf(),
                "attribute entry has an empty 'names' list",
            )),
            (Some(_), Some(_)) => Err(LoaderError::validation_error(
                path.to_path_buf(),
                format!(
                    "attribute entry '{}' sets both 'name' and 'names'",
                    self.label()
                ),
            )),
            (None, None) => Err(LoaderError::validation_error(
                path.to_path_buf(),
                "attribute entry needs 'name' or 'names'",
            )),
        }
    }

    /// Declaration options for this entry
    pub fn options(&self, path: &Path) -> LoaderResult<AttributeOptions> {
        let sources = [&self.value, &self.key, &self.method]
            .iter()
            .filter(|source| source.is_some())
            .count();
        if sources > 1 {
            return Err(LoaderError::validation_error(
                path.to_path_buf(),
                format!(
                    "attribute '{}' sets more than one of 'value', 'key', 'method'",
                    self.label()
                ),
            ));
        }

        let mut options = AttributeOptions::new();
        if let Some(token) = &self.cast_type {
            options = options.cast_token(token.clone());
        }
        if let Some(value_path) = &self.value {
            options = options.path(value_path.clone());
        } else if let Some(key) = &self.key {
            options = options.key(key.clone());
        } else if let Some(method) = &self.method {
            options = options.method(method.clone());
        }
        Ok(options)
    }
}

impl SchemaDocument {
    /// Build and freeze a new schema from this document
    pub fn build(&self, path: &Path) -> LoaderResult<Arc<SchemaDefinition>> {
        let mut schema = SchemaDefinition::new();
        if let Some(token) = &self.default_type {
            let cast_type = token
                .parse::<CastType>()
                .map_err(|e| LoaderError::schema_error(path.to_path_buf(), e))?;
            schema = schema.with_default_cast(cast_type);
        }

        self.apply(&mut schema, path)?;
        Ok(schema.into_shared())
    }

    /// Apply every declaration to an existing schema.
    ///
    /// Use this to combine document declarations with capabilities or
    /// expression attributes declared in code. The schema's own default cast
    /// applies; `default_type` is only honored by [`SchemaDocument::build`].
    pub fn apply(&self, schema: &mut SchemaDefinition, path: &Path) -> LoaderResult<()> {
        for entry in &self.attributes {
            let names = entry.declared_names(path)?;
            let options = entry.options(path)?;
            schema
                .attributes(&names, options)
                .map_err(|e| LoaderError::schema_error(path.to_path_buf(), e))?;
        }

        log::debug!(
            "applied {} schema entries from '{}'",
            self.attributes.len(),
            path.display()
        );
        Ok(())
    }
}
