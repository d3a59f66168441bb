//! Ordered, duplicate-free collection of attribute descriptors
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::attribute::{normalize_name, AttributeDescriptor, AttributeOptions};
use crate::cast::CastType;
use crate::context::{Capabilities, Context};
use crate::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Schema of one data shape.
///
/// Declaration order is output order. Declaring a name twice keeps the first
/// declaration. Once shared through [`SchemaDefinition::into_shared`] the
/// definition is read-only.
#[derive(Debug, Clone, Default)]
pub struct SchemaDefinition {
    attributes: Vec<AttributeDescriptor>,
    index: HashMap<String, usize>,
    capabilities: Capabilities,
    default_cast: Option<CastType>,
}

impl SchemaDefinition {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a schema in one block and freeze it.
    ///
    /// Any declaration error aborts the whole definition.
    pub fn define<F>(declare: F) -> Result<Arc<SchemaDefinition>>
    where
        F: FnOnce(&mut SchemaDefinition) -> Result<()>,
    {
        let mut schema = SchemaDefinition::new();
        declare(&mut schema)?;
        Ok(schema.into_shared())
    }

    /// Cast applied to attributes declared without an explicit one
    pub fn with_default_cast(mut self, cast_type: CastType) -> Self {
        self.default_cast = Some(cast_type);
        self
    }

    /// The schema-wide default cast, if any
    pub fn default_cast(&self) -> Option<CastType> {
        self.default_cast
    }

    /// Declare a single attribute
    pub fn attribute(&mut self, name: &str, options: AttributeOptions) -> Result<&mut Self> {
        let descriptor = AttributeDescriptor::build(name, &options, self.default_cast)?;
        self.insert(descriptor);
        Ok(self)
    }

    /// Declare several attributes sharing the same options.
    ///
    /// Every name is validated before any is inserted.
    pub fn attributes<I, S>(&mut self, names: I, options: AttributeOptions) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let descriptors = names
            .into_iter()
            .map(|name| AttributeDescriptor::build(name.as_ref(), &options, self.default_cast))
            .collect::<Result<Vec<_>>>()?;

        for descriptor in descriptors {
            self.insert(descriptor);
        }
        Ok(self)
    }

    /// Register a named capability for method-reference and expression sources
    pub fn capability<F>(&mut self, name: &str, capability: F) -> &mut Self
    where
        F: Fn(&dyn Context) -> Value + Send + Sync + 'static,
    {
        self.capabilities.insert(name, capability);
        self
    }

    /// Insert a descriptor unless one with the same name exists.
    ///
    /// Returns `true` when the descriptor was added.
    pub fn insert(&mut self, descriptor: AttributeDescriptor) -> bool {
        if self.index.contains_key(descriptor.name()) {
            log::warn!(
                "attribute '{}' already declared, keeping the first declaration",
                descriptor.name()
            );
            return false;
        }

        log::debug!(
            "declared attribute '{}' (cast: {}, source: {})",
            descriptor.name(),
            descriptor
                .cast_type()
                .map(|cast| cast.as_str())
                .unwrap_or("none"),
            descriptor.source().kind()
        );
        self.index
            .insert(descriptor.name().to_string(), self.attributes.len());
        self.attributes.push(descriptor);
        true
    }

    /// Freeze the schema for sharing between instances and threads
    pub fn into_shared(self) -> Arc<SchemaDefinition> {
        Arc::new(self)
    }

    /// Iterate descriptors in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, AttributeDescriptor> {
        self.attributes.iter()
    }

    /// Descriptors in declaration order
    pub fn descriptors(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    /// Attribute names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.attributes.iter().map(AttributeDescriptor::name)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Membership by descriptor equality, i.e. by name
    pub fn contains(&self, descriptor: &AttributeDescriptor) -> bool {
        self.index.contains_key(descriptor.name())
    }

    /// Membership by name, normalized the same way declarations are
    pub fn contains_name(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Declaration index of an attribute
    pub fn position(&self, name: &str) -> Option<usize> {
        let name = normalize_name(name).ok()?;
        self.index.get(&name).copied()
    }

    /// Look up a descriptor by name
    pub fn get(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.position(name).map(|index| &self.attributes[index])
    }

    /// Capabilities declared on this schema
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }
}

impl<'a> IntoIterator for &'a SchemaDefinition {
    type Item = &'a AttributeDescriptor;
    type IntoIter = std::slice::Iter<'a, AttributeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}
