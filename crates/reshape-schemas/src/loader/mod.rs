//! Schema document loading
//!
//! This module provides:
//! - YAML and JSON parsing of schema documents
//! - Building frozen schemas through the core declaration API
//! - A loader that caches schemas until their file changes
//!
//! # Example Usage
//!
//! ```rust
//! use reshape_schemas::loader::{Format, SchemaLoader};
//!
//! let loader = SchemaLoader::new();
//! let schema = loader.load_str(
//!     "attributes:\n  - name: customer_id\n    value: metadata.customer.id\n",
//!     Format::Yaml,
//! )?;
//! assert_eq!(schema.len(), 1);
//! # Ok::<(), reshape_schemas::LoaderError>(())
//! ```
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

pub mod document;
pub mod error;
pub mod parser;
pub mod schema_loader;

pub use document::{AttributeEntry, SchemaDocument};
pub use error::{LoaderError, LoaderResult};
pub use parser::{parse_content, parse_file, Format};
pub use schema_loader::SchemaLoader;
