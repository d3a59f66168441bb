//! Schema declaration: attributes, their value sources, and the definition
//! that collects them
//!
//! A schema is declared once per data shape and then shared, frozen, by every
//! model of that shape.
//!
//! # Example
//!
//! ```
//! use reshape_core::{AttributeOptions, CastType, SchemaDefinition};
//!
//! let mut schema = SchemaDefinition::new();
//! schema
//!     .attribute("name", AttributeOptions::new())?
//!     .attribute("price", AttributeOptions::new().key("unit_price").cast(CastType::Float))?
//!     .attribute("customer_id", AttributeOptions::new().path("metadata.customer.id"))?;
//!
//! assert_eq!(schema.len(), 3);
//! # Ok::<(), reshape_core::Error>(())
//! ```
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

pub mod attribute;
pub mod definition;
pub mod source;

#[cfg(test)]
mod tests;

pub use attribute::{AttributeDescriptor, AttributeOptions};
pub use definition::SchemaDefinition;
pub use source::{Expression, ValueSource};
