//! Output assembly for one context
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::cache::ResolutionCache;
use super::options::{JsonOptions, SerializeOptions};
use crate::context::Context;
use crate::schema::attribute::normalize_name;
use crate::schema::{AttributeDescriptor, SchemaDefinition};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};
use std::collections::HashSet;

/// Output record: attribute name to resolved value, in declaration order
pub type Record = Map<String, Value>;

/// Builds output records for a context from a schema.
///
/// Values are memoized in the borrowed [`ResolutionCache`], so every
/// attribute is resolved at most once for the lifetime of that cache.
pub struct AttributeSet<'a> {
    context: &'a dyn Context,
    schema: &'a SchemaDefinition,
    cache: &'a ResolutionCache,
}

impl<'a> AttributeSet<'a> {
    /// Bind a context and schema to a cache built for that schema
    pub fn new(
        context: &'a dyn Context,
        schema: &'a SchemaDefinition,
        cache: &'a ResolutionCache,
    ) -> Self {
        Self {
            context,
            schema,
            cache,
        }
    }

    /// Surviving attribute names, in declaration order.
    ///
    /// `only` wins when both filters are present; unknown names are ignored.
    pub fn selected_names(&self, options: &SerializeOptions) -> Vec<&'a str> {
        let schema: &'a SchemaDefinition = self.schema;

        if let Some(only) = &options.only {
            if options.except.is_some() {
                log::debug!("both only and except given, ignoring except");
            }
            let keep = name_set(only);
            schema.names().filter(|name| keep.contains(*name)).collect()
        } else if let Some(except) = &options.except {
            let drop = name_set(except);
            schema.names().filter(|name| !drop.contains(*name)).collect()
        } else {
            schema.names().collect()
        }
    }

    /// Resolve a single attribute by name.
    ///
    /// Returns `None` when the schema does not declare it.
    pub fn attribute(&self, name: &str) -> Result<Option<Value>> {
        match self.schema.position(name) {
            Some(index) => self.resolve_at(index).map(Some),
            None => Ok(None),
        }
    }

    /// Build the output record
    pub fn to_record(&self, options: &SerializeOptions) -> Result<Record> {
        let names = self.selected_names(options);
        log::debug!(
            "serializing {} of {} attributes",
            names.len(),
            self.schema.len()
        );

        let mut record = Record::new();
        for name in names {
            if let Some(index) = self.schema.position(name) {
                record.insert(name.to_string(), self.resolve_at(index)?);
            }
        }
        Ok(record)
    }

    /// Build the output record and encode it as JSON text
    pub fn to_json(&self, options: &SerializeOptions) -> Result<String> {
        let record = self.to_record(options)?;
        encode(&record, &options.json)
    }

    fn resolve_at(&self, index: usize) -> Result<Value> {
        let descriptor: &AttributeDescriptor = &self.schema.descriptors()[index];
        match self.cache.slot(index) {
            Some(slot) => descriptor.resolve(self.context, slot).cloned(),
            None => {
                log::warn!(
                    "no cache slot for attribute '{}', resolving uncached",
                    descriptor.name()
                );
                descriptor.read(self.context)
            }
        }
    }
}

fn name_set(names: &[String]) -> HashSet<String> {
    names
        .iter()
        .filter_map(|name| normalize_name(name).ok())
        .collect()
}

/// Encode a record with the given encoder options
pub fn encode(record: &Record, options: &JsonOptions) -> Result<String> {
    if !options.pretty {
        return Ok(serde_json::to_string(record)?);
    }

    let indent = options.indent.as_deref().unwrap_or("  ");
    let mut buffer = Vec::new();
    {
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        record.serialize(&mut serializer)?;
    }

    String::from_utf8(buffer)
        .map_err(|e| Error::from(<serde_json::Error as serde::ser::Error>::custom(e)))
}
