//! Serialization options
//!
//! Filter options and encoder options live in separate fields, so a filter key
//! can never reach the JSON encoder.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

/// Options for the JSON encoder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonOptions {
    /// Emit indented, multi-line JSON
    pub pretty: bool,
    /// Indentation used when `pretty` is set; two spaces when `None`
    pub indent: Option<String>,
}

impl JsonOptions {
    /// Pretty-printed output with the default indentation
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            indent: None,
        }
    }

    /// Pretty-printed output with a custom indentation
    pub fn indented(indent: impl Into<String>) -> Self {
        Self {
            pretty: true,
            indent: Some(indent.into()),
        }
    }
}

/// Options for producing a record or its JSON text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Keep only these attributes; takes precedence over `except`
    pub only: Option<Vec<String>>,
    /// Drop these attributes
    pub except: Option<Vec<String>>,
    /// Encoder settings, used by JSON output only
    pub json: JsonOptions,
}

impl SerializeOptions {
    /// Every declared attribute, compact JSON
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict output to the given attributes
    pub fn only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Remove the given attributes from the output
    pub fn except<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict output to a single attribute
    pub fn only_name(self, name: impl Into<String>) -> Self {
        self.only([name.into()])
    }

    /// Remove a single attribute from the output
    pub fn except_name(self, name: impl Into<String>) -> Self {
        self.except([name.into()])
    }

    /// Set the JSON encoder options
    pub fn json(mut self, json: JsonOptions) -> Self {
        self.json = json;
        self
    }
}
