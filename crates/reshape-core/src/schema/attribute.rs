//! Attribute descriptors and their declaration options
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::source::{Expression, ValueSource};
use crate::cast::CastType;
use crate::context::Context;
use crate::{Error, Result};
use once_cell::unsync::OnceCell;
use serde_json::Value;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
enum CastSpec {
    Typed(CastType),
    Token(String),
}

#[derive(Debug, Clone)]
enum SourceSpec {
    Path(String),
    Key(String),
    Method(String),
    Expression(Expression),
}

/// Options accepted when declaring an attribute.
///
/// Only the last source set wins; the cast token is validated when the
/// attribute is declared, not here.
#[derive(Debug, Clone, Default)]
pub struct AttributeOptions {
    cast: Option<CastSpec>,
    source: Option<SourceSpec>,
}

impl AttributeOptions {
    /// Create empty options: no cast, value read from the attribute's own key
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cast type
    pub fn cast(mut self, cast_type: CastType) -> Self {
        self.cast = Some(CastSpec::Typed(cast_type));
        self
    }

    /// Set the cast type from a token such as `"integer"`
    pub fn cast_token(mut self, token: impl Into<String>) -> Self {
        self.cast = Some(CastSpec::Token(token.into()));
        self
    }

    /// Read the value from a dotted path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.source = Some(SourceSpec::Path(path.into()));
        self
    }

    /// Read the value from a different top-level key
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.source = Some(SourceSpec::Key(key.into()));
        self
    }

    /// Read the value from a context capability, or the key of the same name
    pub fn method(mut self, name: impl Into<String>) -> Self {
        self.source = Some(SourceSpec::Method(name.into()));
        self
    }

    /// Compute the value inline
    pub fn expr<F>(mut self, f: F) -> Self
    where
        F: Fn(&dyn Context) -> Value + Send + Sync + 'static,
    {
        self.source = Some(SourceSpec::Expression(Expression::new(f)));
        self
    }

    fn resolve_cast(&self, default_cast: Option<CastType>) -> Result<Option<CastType>> {
        match &self.cast {
            Some(CastSpec::Typed(cast_type)) => Ok(Some(*cast_type)),
            Some(CastSpec::Token(token)) => token.parse().map(Some),
            None => Ok(default_cast),
        }
    }

    fn resolve_source(&self, name: &str) -> Result<ValueSource> {
        match &self.source {
            Some(SourceSpec::Path(path)) => ValueSource::path(path),
            Some(SourceSpec::Key(key)) => Ok(ValueSource::Key(key.clone())),
            Some(SourceSpec::Method(method)) => Ok(ValueSource::MethodRef(method.clone())),
            Some(SourceSpec::Expression(expression)) => {
                Ok(ValueSource::Expression(expression.clone()))
            }
            None => Ok(ValueSource::Key(name.to_string())),
        }
    }
}

/// Normalize an attribute name to its canonical form
pub fn normalize_name(name: &str) -> Result<String> {
    let normalized = name.trim().trim_start_matches(':');
    if normalized.is_empty() {
        return Err(Error::configuration(format!(
            "Invalid attribute name '{}': name must not be empty",
            name
        )));
    }
    Ok(normalized.to_string())
}

/// One declared output attribute.
///
/// Two descriptors are equal when their names are equal, whatever their cast
/// or source.
#[derive(Debug, Clone)]
pub struct AttributeDescriptor {
    name: String,
    cast_type: Option<CastType>,
    source: ValueSource,
}

impl AttributeDescriptor {
    /// Describe an attribute read from its own key without a cast
    pub fn new(name: &str) -> Result<Self> {
        Self::with_options(name, &AttributeOptions::default())
    }

    /// Describe an attribute from declaration options
    pub fn with_options(name: &str, options: &AttributeOptions) -> Result<Self> {
        Self::build(name, options, None)
    }

    pub(crate) fn build(
        name: &str,
        options: &AttributeOptions,
        default_cast: Option<CastType>,
    ) -> Result<Self> {
        let name = normalize_name(name)?;
        let cast_type = options.resolve_cast(default_cast)?;
        let source = options.resolve_source(&name)?;

        Ok(Self {
            name,
            cast_type,
            source,
        })
    }

    /// Output key of the attribute
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared cast, if any
    pub fn cast_type(&self) -> Option<CastType> {
        self.cast_type
    }

    /// Where the value is read from
    pub fn source(&self) -> &ValueSource {
        &self.source
    }

    /// Extract and cast the value without caching
    pub fn read(&self, context: &dyn Context) -> Result<Value> {
        let raw = self.source.extract(context);
        match self.cast_type {
            Some(cast_type) => cast_type
                .apply(&raw)
                .map_err(|e| e.for_attribute(&self.name)),
            None => Ok(raw),
        }
    }

    /// Resolve the value once, caching it in `slot`.
    ///
    /// A cached `null` counts as resolved. Failures are not cached.
    pub fn resolve<'s>(&self, context: &dyn Context, slot: &'s OnceCell<Value>) -> Result<&'s Value> {
        if let Some(value) = slot.get() {
            log::trace!("attribute '{}' served from cache", self.name);
            return Ok(value);
        }

        log::trace!(
            "resolving attribute '{}' from {} source",
            self.name,
            self.source.kind()
        );
        slot.get_or_try_init(|| self.read(context))
    }
}

impl PartialEq for AttributeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for AttributeDescriptor {}

impl Hash for AttributeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
