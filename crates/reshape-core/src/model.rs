//! Models: raw input data bound to the schema of its shape
//!
//! A [`Model`] wraps one input record and the shared schema of its shape.
//! Every record and JSON call on the same model shares one resolution cache,
//! so each attribute is resolved at most once per model.
//!
//! A model is not `Sync`. To transform the same input on several threads,
//! build one model per thread from the shared `Arc<SchemaDefinition>`.
//!
//! # Example
//!
//! ```
//! use reshape_core::{AttributeOptions, Model, SchemaDefinition, SerializeOptions};
//! use serde_json::json;
//!
//! let schema = SchemaDefinition::define(|schema| {
//!     schema.attributes(["first_name", "last_name"], AttributeOptions::new())?;
//!     Ok(())
//! })?;
//!
//! let model = Model::new(
//!     schema,
//!     json!({"first_name": "Jane", "last_name": "Doe", "email": "jane@example.com"}),
//! );
//! assert_eq!(
//!     model.to_json(&SerializeOptions::new())?,
//!     r#"{"first_name":"Jane","last_name":"Doe"}"#
//! );
//! # Ok::<(), reshape_core::Error>(())
//! ```
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use crate::context::Context;
use crate::schema::SchemaDefinition;
use crate::serialize::{AttributeSet, Record, ResolutionCache, SerializeOptions};
use crate::Result;
use once_cell::unsync::OnceCell;
use serde_json::Value;
use std::sync::Arc;

/// One input record bound to its schema
#[derive(Debug)]
pub struct Model {
    data: Value,
    schema: Arc<SchemaDefinition>,
    cache: OnceCell<ResolutionCache>,
}

impl Model {
    /// Wrap raw input data
    pub fn new(schema: Arc<SchemaDefinition>, data: Value) -> Self {
        Self {
            data,
            schema,
            cache: OnceCell::new(),
        }
    }

    /// The raw input data
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// The schema shared by every model of this shape
    pub fn schema(&self) -> &Arc<SchemaDefinition> {
        &self.schema
    }

    /// Attribute set bound to this model, sharing its cache across calls
    pub fn attribute_set(&self) -> AttributeSet<'_> {
        let cache = self
            .cache
            .get_or_init(|| ResolutionCache::for_schema(&self.schema));
        AttributeSet::new(self, &self.schema, cache)
    }

    /// Transform into an output record
    pub fn to_record(&self, options: &SerializeOptions) -> Result<Record> {
        self.attribute_set().to_record(options)
    }

    /// Transform into JSON text
    pub fn to_json(&self, options: &SerializeOptions) -> Result<String> {
        self.attribute_set().to_json(options)
    }

    /// Resolve one declared attribute; `None` if the schema lacks it
    pub fn attribute(&self, name: &str) -> Result<Option<Value>> {
        self.attribute_set().attribute(name)
    }
}

impl Context for Model {
    fn raw_data(&self) -> Option<&Value> {
        Some(&self.data)
    }

    fn invoke(&self, name: &str) -> Option<Value> {
        self.schema.capabilities().call(name, self)
    }
}

/// Storage for the frozen schema of a [`Transformer`] shape
pub type SchemaCell = once_cell::sync::OnceCell<Arc<SchemaDefinition>>;

/// A named data shape with one schema shared by all of its models.
///
/// ```
/// use reshape_core::{AttributeOptions, Result, SchemaCell, SchemaDefinition, SerializeOptions, Transformer};
/// use serde_json::json;
///
/// struct ProductMapper;
///
/// impl Transformer for ProductMapper {
///     fn schema_cell() -> &'static SchemaCell {
///         static SCHEMA: SchemaCell = SchemaCell::new();
///         &SCHEMA
///     }
///
///     fn declare(schema: &mut SchemaDefinition) -> Result<()> {
///         schema.attribute("name", AttributeOptions::new())?;
///         Ok(())
///     }
/// }
///
/// let record = ProductMapper::to_record(json!({"name": "Travel Bag"}), &SerializeOptions::new())?;
/// assert_eq!(record["name"], json!("Travel Bag"));
/// # Ok::<(), reshape_core::Error>(())
/// ```
pub trait Transformer {
    /// Static storage holding this shape's schema once declared
    fn schema_cell() -> &'static SchemaCell;

    /// Declare the attributes of this shape
    fn declare(schema: &mut SchemaDefinition) -> Result<()>;

    /// The shared schema, declared on first use.
    ///
    /// A failed declaration is returned to every caller and no model is built.
    fn schema_definition() -> Result<Arc<SchemaDefinition>> {
        Self::schema_cell()
            .get_or_try_init(|| SchemaDefinition::define(Self::declare))
            .cloned()
    }

    /// Wrap input data in a model of this shape
    fn model(data: Value) -> Result<Model> {
        Ok(Model::new(Self::schema_definition()?, data))
    }

    /// Transform input data into an output record
    fn to_record(data: Value, options: &SerializeOptions) -> Result<Record> {
        Self::model(data)?.to_record(options)
    }

    /// Transform input data into JSON text
    fn to_json(data: Value, options: &SerializeOptions) -> Result<String> {
        Self::model(data)?.to_json(options)
    }
}
