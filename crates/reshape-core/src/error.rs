//! Error types for the Reshape core library
//!
//! This module defines the error handling system for Reshape, using thiserror
//! for ergonomic error definitions. Declaration mistakes fail while the schema
//! is being built; cast failures surface to whoever asked for the output.

use thiserror::Error;

/// Main error type for Reshape operations
#[derive(Error, Debug)]
pub enum Error {
    /// A cast type token outside the supported set was declared
    #[error(
        "The :{cast_type} is not a supported cast type. Make sure to use either one of the following cast types: {}",
        supported.join(", ")
    )]
    UnsupportedCastType {
        cast_type: String,
        supported: Vec<String>,
    },

    /// Other declaration-time misuse of the schema API
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Casting an extracted value failed
    #[error("Cast failed for attribute '{attribute}': cannot convert {from} to {to} for value {value}: {reason}")]
    Cast {
        attribute: String,
        from: String,
        to: String,
        value: String,
        reason: String,
    },

    /// JSON serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// True for errors raised while declaring a schema
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedCastType { .. } | Error::Configuration { .. }
        )
    }

    /// Attach the attribute name to a cast failure raised without one
    pub(crate) fn for_attribute(self, name: &str) -> Self {
        match self {
            Error::Cast {
                attribute,
                from,
                to,
                value,
                reason,
            } if attribute.is_empty() => Error::Cast {
                attribute: name.to_string(),
                from,
                to,
                value,
                reason,
            },
            other => other,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
