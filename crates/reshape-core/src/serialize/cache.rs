//! Per-instance resolution cache
//!
//! One slot per descriptor of a schema, indexed by declaration position. A
//! slot is either empty or holds a resolved value, which may be `null`.
//!
//! The cache is not `Sync`; it belongs to the single model instance that
//! created it.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use crate::schema::SchemaDefinition;
use once_cell::unsync::OnceCell;
use serde_json::Value;

/// Memoized attribute values for one context
#[derive(Debug, Default)]
pub struct ResolutionCache {
    slots: Vec<OnceCell<Value>>,
}

impl ResolutionCache {
    /// Create empty slots for every attribute of a schema
    pub fn for_schema(schema: &SchemaDefinition) -> Self {
        Self {
            slots: (0..schema.len()).map(|_| OnceCell::new()).collect(),
        }
    }

    /// Slot for the attribute at `index`
    pub fn slot(&self, index: usize) -> Option<&OnceCell<Value>> {
        self.slots.get(index)
    }

    /// Cached value at `index`, if resolved
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.slots.get(index).and_then(OnceCell::get)
    }

    /// Number of resolved slots
    pub fn resolved_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.get().is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
