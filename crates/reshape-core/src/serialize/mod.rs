//! Record assembly and JSON output
//!
//! - [`options`] - filter and encoder options
//! - [`cache`] - per-instance memoization of resolved values
//! - [`attribute_set`] - filtering, resolution, and encoding
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

pub mod attribute_set;
pub mod cache;
pub mod options;

pub use attribute_set::{encode, AttributeSet, Record};
pub use cache::ResolutionCache;
pub use options::{JsonOptions, SerializeOptions};
