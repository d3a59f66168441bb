//! Reshape Core - schema-driven record transformation
//!
//! This crate turns arbitrary nested input records into flat output records
//! holding only the attributes a schema declares, each resolved from the input
//! and optionally cast.
//!
//! # Main Components
//!
//! - **Error Handling**: error types using `thiserror`
//! - **Casting**: the fixed set of cast types and their coercion rules
//! - **Schema**: attribute descriptors, value sources, and the ordered,
//!   duplicate-free [`SchemaDefinition`]
//! - **Serialization**: [`AttributeSet`] filtering, memoized resolution, and
//!   JSON output
//! - **Models**: [`Model`] and the [`Transformer`] shape trait
//!
//! # Example
//!
//! ```
//! use reshape_core::{AttributeOptions, CastType, Model, SchemaDefinition, SerializeOptions};
//! use serde_json::json;
//!
//! let schema = SchemaDefinition::define(|schema| {
//!     schema
//!         .attribute("name", AttributeOptions::new())?
//!         .attribute("quantity", AttributeOptions::new().cast(CastType::Integer))?
//!         .attribute("customer_id", AttributeOptions::new().path("metadata.customer.id"))?;
//!     Ok(())
//! })?;
//!
//! let model = Model::new(schema, json!({
//!     "name": "Travel Bag",
//!     "quantity": "2",
//!     "metadata": {"customer": {"id": "625808ac"}}
//! }));
//!
//! let record = model.to_record(&SerializeOptions::new().except(["customer_id"]))?;
//! assert_eq!(record["quantity"], json!(2));
//! assert!(record.get("customer_id").is_none());
//! # Ok::<(), reshape_core::Error>(())
//! ```

pub mod cast;
pub mod context;
pub mod error;
pub mod model;
pub mod schema;
pub mod serialize;

// Re-export main types for convenience
pub use cast::CastType;
pub use context::{Capabilities, CapabilityFn, Context};
pub use error::{Error, Result};
pub use model::{Model, SchemaCell, Transformer};
pub use schema::{AttributeDescriptor, AttributeOptions, Expression, SchemaDefinition, ValueSource};
pub use serialize::{AttributeSet, JsonOptions, Record, ResolutionCache, SerializeOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
