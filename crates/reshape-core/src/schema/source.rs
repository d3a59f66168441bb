//! Value sources: where an attribute finds its raw value
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use crate::context::Context;
use crate::{Error, Result};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// An inline computation evaluated against the context
#[derive(Clone)]
pub struct Expression(Arc<dyn Fn(&dyn Context) -> Value + Send + Sync>);

impl Expression {
    /// Wrap a closure as an expression source
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&dyn Context) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Evaluate the expression
    pub fn evaluate(&self, context: &dyn Context) -> Value {
        (self.0)(context)
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Expression(<closure>)")
    }
}

/// Strategy used to locate an attribute's raw value
#[derive(Debug, Clone)]
pub enum ValueSource {
    /// Inline computation with the context as its environment
    Expression(Expression),
    /// Dot-delimited walk through nested data
    Path(Vec<String>),
    /// Named capability on the context, falling back to a key lookup
    MethodRef(String),
    /// Direct single-level key lookup
    Key(String),
}

impl ValueSource {
    /// Parse a dotted path such as `metadata.customer.id`
    pub fn path(path: &str) -> Result<Self> {
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(Error::configuration(format!(
                "Invalid value path '{}': empty path segment",
                path
            )));
        }
        Ok(ValueSource::Path(segments))
    }

    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            ValueSource::Expression(_) => "expression",
            ValueSource::Path(_) => "path",
            ValueSource::MethodRef(_) => "method",
            ValueSource::Key(_) => "key",
        }
    }

    /// Extract the raw, uncast value from a context.
    ///
    /// Absence at any step yields `null`.
    pub fn extract(&self, context: &dyn Context) -> Value {
        match self {
            ValueSource::Expression(expression) => expression.evaluate(context),
            ValueSource::Path(segments) => context
                .raw_data()
                .and_then(|data| walk(data, segments))
                .cloned()
                .unwrap_or(Value::Null),
            ValueSource::MethodRef(name) => match context.invoke(name) {
                Some(value) => value,
                None => lookup_key(context, name),
            },
            ValueSource::Key(key) => lookup_key(context, key),
        }
    }
}

fn lookup_key(context: &dyn Context, key: &str) -> Value {
    context
        .raw_data()
        .and_then(|data| data.get(key))
        .cloned()
        .unwrap_or(Value::Null)
}

fn step<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match current {
        Value::Object(map) => map.get(segment),
        // Arrays are addressed by their index at the same segment
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    }
}

/// Walk nested data along path segments
pub fn walk<'a, S: AsRef<str>>(data: &'a Value, segments: &[S]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(data, |current, segment| step(current, segment.as_ref()))
}
