//! Reshape Schemas - declarative schema documents
//!
//! Schemas can be declared in code with `reshape_core`, or as YAML and JSON
//! documents loaded by this crate:
//!
//! ```yaml
//! default_type: string
//! attributes:
//!   - name: customer_id
//!     value: metadata.customer.id
//!   - name: price
//!     key: unit_price
//!     type: decimal
//!   - name: full_name
//!     method: full_name
//!   - names: [first_name, last_name]
//! ```
//!
//! Each entry declares one `name` or a bulk `names` list, an optional cast
//! `type`, and at most one source: `value` (dotted path), `key`, or `method`.
//! Expressions and capabilities only exist in code; declare them on a
//! `SchemaDefinition` and pass it to [`SchemaLoader::load_file_into`].
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

pub mod loader;

// Re-export commonly used types for convenience
pub use loader::{
    parse_content, parse_file, AttributeEntry, Format, LoaderError, LoaderResult, SchemaDocument,
    SchemaLoader,
};
