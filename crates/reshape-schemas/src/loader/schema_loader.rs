//! Schema loader with an mtime-checked cache
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::parser::{self, Format};
use reshape_core::SchemaDefinition;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default number of schemas kept by a loader
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

#[derive(Debug, Clone)]
struct CacheEntry {
    schema: Arc<SchemaDefinition>,
    fingerprint: u64,
}

fn fingerprint(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

/// Loads schema documents and keeps the frozen schemas they declare
#[derive(Debug)]
pub struct SchemaLoader {
    cache: HashMap<PathBuf, CacheEntry>,
    access_order: Vec<PathBuf>,
    max_entries: usize,
}

impl Default for SchemaLoader {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }
}

impl SchemaLoader {
    /// Create a new schema loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader keeping at most `max_entries` schemas.
    ///
    /// The least recently loaded path is evicted first. Zero disables caching.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            cache: HashMap::new(),
            access_order: Vec::new(),
            max_entries,
        }
    }

    /// Load the schema declared in a file.
    ///
    /// The same `Arc` is returned for as long as the file content is unchanged.
    pub fn load_file(&mut self, path: &Path) -> LoaderResult<Arc<SchemaDefinition>> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let fingerprint = fingerprint(&content);

        if let Some(entry) = self.cache.get(&key) {
            if entry.fingerprint == fingerprint {
                let schema = Arc::clone(&entry.schema);
                log::debug!("schema cache hit for '{}'", path.display());
                self.touch(&key);
                return Ok(schema);
            }
        }

        let schema = parser::parse_content(&content, format, path)?.build(path)?;
        log::debug!(
            "loaded schema with {} attributes from '{}'",
            schema.len(),
            path.display()
        );

        self.store(
            key,
            CacheEntry {
                schema: Arc::clone(&schema),
                fingerprint,
            },
        );
        Ok(schema)
    }

    fn store(&mut self, key: PathBuf, entry: CacheEntry) {
        if self.max_entries == 0 {
            return;
        }
        if !self.cache.contains_key(&key)
            && self.cache.len() >= self.max_entries
            && !self.access_order.is_empty()
        {
            let evicted = self.access_order.remove(0);
            log::debug!("evicting cached schema '{}'", evicted.display());
            self.cache.remove(&evicted);
        }
        self.cache.insert(key.clone(), entry);
        self.touch(&key);
    }

    fn touch(&mut self, key: &Path) {
        self.access_order.retain(|cached| cached != key);
        self.access_order.push(key.to_path_buf());
    }

    /// Load a file's declarations on top of a schema declared in code.
    ///
    /// The result is not cached, since `base` may differ between calls.
    pub fn load_file_into(
        &self,
        path: &Path,
        mut base: SchemaDefinition,
    ) -> LoaderResult<Arc<SchemaDefinition>> {
        let document = parser::parse_file(path)?;
        document.apply(&mut base, path)?;
        Ok(base.into_shared())
    }

    /// Build a schema from in-memory content
    pub fn load_str(&self, content: &str, format: Format) -> LoaderResult<Arc<SchemaDefinition>> {
        let origin = Path::new("<inline>");
        parser::parse_content(content, format, origin)?.build(origin)
    }

    /// Number of cached schemas
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached schema
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.access_order.clear();
    }
}
