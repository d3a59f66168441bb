//! Resolution context and named capabilities
//!
//! A [`Context`] is whatever an attribute is resolved against: it exposes the
//! raw input data and, optionally, named zero-argument capabilities that
//! method-reference and expression sources can call.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The subject an attribute value is resolved against
pub trait Context {
    /// Raw input data, or `None` when no data is reachable
    fn raw_data(&self) -> Option<&Value>;

    /// Invoke a named capability.
    ///
    /// Returns `None` when the context has no capability by that name, which
    /// is distinct from a capability that ran and produced `null`.
    fn invoke(&self, name: &str) -> Option<Value> {
        let _ = name;
        None
    }
}

impl Context for Value {
    fn raw_data(&self) -> Option<&Value> {
        Some(self)
    }
}

impl<C: Context + ?Sized> Context for &C {
    fn raw_data(&self) -> Option<&Value> {
        (**self).raw_data()
    }

    fn invoke(&self, name: &str) -> Option<Value> {
        (**self).invoke(name)
    }
}

/// A context-derived computation, shared by every instance of a schema
pub type CapabilityFn = Arc<dyn Fn(&dyn Context) -> Value + Send + Sync>;

/// Named capabilities declared alongside a schema
#[derive(Clone, Default)]
pub struct Capabilities {
    entries: HashMap<String, CapabilityFn>,
}

impl Capabilities {
    /// Create an empty capability table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability, replacing any previous one with the same name
    pub fn insert<F>(&mut self, name: impl Into<String>, capability: F)
    where
        F: Fn(&dyn Context) -> Value + Send + Sync + 'static,
    {
        self.entries.insert(name.into(), Arc::new(capability));
    }

    /// Check whether a capability exists
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Run a capability against a context
    pub fn call(&self, name: &str, context: &dyn Context) -> Option<Value> {
        self.entries.get(name).map(|capability| capability(context))
    }

    /// Number of registered capabilities
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no capability is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.entries.keys().collect();
        names.sort();
        f.debug_struct("Capabilities").field("names", &names).finish()
    }
}
