//! Cast types and value coercion
//!
//! An attribute may declare one of a fixed set of cast types. The cast is
//! applied to the extracted value before it lands in the output record.
//! `null` is never coerced: an absent value stays absent whatever the cast.
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use crate::{Error, Result};
use bigdecimal::BigDecimal;
use serde_json::{Map, Number, Value};
use std::fmt;
use std::str::FromStr;

/// Target type an extracted value is coerced into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastType {
    String,
    Integer,
    Float,
    Decimal,
    Hash,
    Array,
}

impl CastType {
    /// Every token accepted by [`CastType::from_str`]
    pub const SUPPORTED: &'static [&'static str] = &[
        "string",
        "integer",
        "float",
        "decimal",
        "bigdecimal",
        "big_decimal",
        "hash",
        "array",
    ];

    /// Canonical token for this cast type
    pub fn as_str(&self) -> &'static str {
        match self {
            CastType::String => "string",
            CastType::Integer => "integer",
            CastType::Float => "float",
            CastType::Decimal => "decimal",
            CastType::Hash => "hash",
            CastType::Array => "array",
        }
    }

    /// Coerce a value into this cast type
    pub fn apply(&self, value: &Value) -> Result<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }

        match self {
            CastType::String => Ok(to_string(value)),
            CastType::Integer => to_integer(value),
            CastType::Float => to_float(value),
            CastType::Decimal => to_decimal(value),
            CastType::Array => Ok(to_array(value)),
            CastType::Hash => to_hash(value),
        }
    }
}

impl FromStr for CastType {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        let normalized = token.trim().trim_start_matches(':').to_lowercase();
        match normalized.as_str() {
            "string" => Ok(CastType::String),
            "integer" => Ok(CastType::Integer),
            "float" => Ok(CastType::Float),
            "decimal" | "bigdecimal" | "big_decimal" => Ok(CastType::Decimal),
            "hash" => Ok(CastType::Hash),
            "array" => Ok(CastType::Array),
            _ => Err(Error::UnsupportedCastType {
                cast_type: token.trim().trim_start_matches(':').to_string(),
                supported: CastType::SUPPORTED.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

impl fmt::Display for CastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short type label used in cast error messages
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn cast_error(value: &Value, to: CastType, reason: impl Into<String>) -> Error {
    Error::Cast {
        attribute: String::new(),
        from: type_name(value).to_string(),
        to: to.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn to_string(value: &Value) -> Value {
    match value {
        Value::String(_) => value.clone(),
        Value::Number(n) => Value::String(n.to_string()),
        Value::Bool(b) => Value::String(b.to_string()),
        // Composite values render as compact JSON text
        other => Value::String(other.to_string()),
    }
}

/// Largest exponent accepted by the integer and decimal casts
const MAX_EXPONENT: u64 = 4096;

fn numeric_text(value: &Value, to: CastType) -> Result<String> {
    match value {
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.trim().to_string()),
        _ => Err(cast_error(value, to, "value is not numeric")),
    }
}

fn parse_big_decimal(value: &Value, to: CastType) -> Result<BigDecimal> {
    let text = numeric_text(value, to)?;
    let decimal =
        BigDecimal::from_str(&text).map_err(|e| cast_error(value, to, e.to_string()))?;

    let (_, scale) = decimal.as_bigint_and_exponent();
    if scale.unsigned_abs() > MAX_EXPONENT {
        return Err(cast_error(value, to, "exponent out of range"));
    }
    Ok(decimal)
}

// Number keeps the exact digits of the text (arbitrary_precision)
fn number_value(value: &Value, to: CastType, text: &str) -> Result<Value> {
    serde_json::from_str::<Number>(text)
        .map(Value::Number)
        .map_err(|e| cast_error(value, to, e.to_string()))
}

fn to_integer(value: &Value) -> Result<Value> {
    if let Value::Number(n) = value {
        if n.is_i64() || n.is_u64() {
            return Ok(value.clone());
        }
    }

    // Truncates toward zero
    let integer = parse_big_decimal(value, CastType::Integer)?.with_scale(0);
    number_value(value, CastType::Integer, &integer.to_plain_string())
}

fn float_value(value: &Value, float: f64) -> Result<Value> {
    Number::from_f64(float)
        .map(Value::Number)
        .ok_or_else(|| cast_error(value, CastType::Float, "not a finite number"))
}

fn to_float(value: &Value) -> Result<Value> {
    match value {
        Value::Number(n) => {
            let float = n
                .as_f64()
                .ok_or_else(|| cast_error(value, CastType::Float, "not representable as a float"))?;
            float_value(value, float)
        }
        Value::String(s) => {
            let float = s
                .trim()
                .parse::<f64>()
                .map_err(|e| cast_error(value, CastType::Float, e.to_string()))?;
            float_value(value, float)
        }
        _ => Err(cast_error(value, CastType::Float, "value is not numeric")),
    }
}

fn to_decimal(value: &Value) -> Result<Value> {
    let decimal = parse_big_decimal(value, CastType::Decimal)?;
    number_value(value, CastType::Decimal, &decimal.to_plain_string())
}

fn to_array(value: &Value) -> Value {
    match value {
        Value::Array(_) => value.clone(),
        Value::Object(map) => Value::Array(
            map.iter()
                .map(|(key, item)| Value::Array(vec![Value::String(key.clone()), item.clone()]))
                .collect(),
        ),
        scalar => Value::Array(vec![scalar.clone()]),
    }
}

fn hash_key(value: &Value, key: &Value) -> Result<String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(cast_error(
            value,
            CastType::Hash,
            format!("{} cannot be used as a key", type_name(key)),
        )),
    }
}

fn to_hash(value: &Value) -> Result<Value> {
    let items = match value {
        Value::Object(_) => return Ok(value.clone()),
        Value::Array(items) => items,
        _ => return Err(cast_error(value, CastType::Hash, "value is not a sequence of pairs")),
    };

    let all_pairs = items
        .iter()
        .all(|item| matches!(item, Value::Array(pair) if pair.len() == 2));

    let mut map = Map::new();
    if all_pairs {
        for item in items {
            if let Value::Array(pair) = item {
                map.insert(hash_key(value, &pair[0])?, pair[1].clone());
            }
        }
    } else if items.len() == 2 && !items[0].is_array() {
        // A single flat [key, value] pair
        map.insert(hash_key(value, &items[0])?, items[1].clone());
    } else {
        return Err(cast_error(
            value,
            CastType::Hash,
            "every element must be a [key, value] pair",
        ));
    }

    Ok(Value::Object(map))
}
