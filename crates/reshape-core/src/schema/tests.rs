//! Tests for attribute descriptors and schema definitions
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use super::{AttributeDescriptor, AttributeOptions, SchemaDefinition, ValueSource};
use crate::cast::CastType;
use crate::context::Context;
use crate::Error;
use once_cell::unsync::OnceCell;
use serde_json::{json, Value};
use std::cell::Cell;

struct UserContext {
    data: Value,
    full_name_calls: Cell<usize>,
}

impl UserContext {
    fn new() -> Self {
        Self {
            data: json!({
                "id": 123,
                "email": "jane@example.com",
                "first_name": "Jane",
                "last_name": "Joules",
                "metadata": {
                    "username": "jane89",
                    "user_profile_id": "456",
                    "hour_rate": "100.00"
                }
            }),
            full_name_calls: Cell::new(0),
        }
    }
}

impl Context for UserContext {
    fn raw_data(&self) -> Option<&Value> {
        Some(&self.data)
    }

    fn invoke(&self, name: &str) -> Option<Value> {
        match name {
            "full_name" => {
                self.full_name_calls.set(self.full_name_calls.get() + 1);
                Some(json!(format!(
                    "{} {}",
                    self.data["first_name"].as_str().unwrap_or_default(),
                    self.data["last_name"].as_str().unwrap_or_default()
                )))
            }
            _ => None,
        }
    }
}

struct EmptyContext;

impl Context for EmptyContext {
    fn raw_data(&self) -> Option<&Value> {
        None
    }
}

fn read(descriptor: &AttributeDescriptor) -> Value {
    descriptor.read(&UserContext::new()).unwrap()
}

#[test]
fn test_normalizes_name() {
    assert_eq!(AttributeDescriptor::new("email").unwrap().name(), "email");
    assert_eq!(AttributeDescriptor::new(":email").unwrap().name(), "email");
    assert_eq!(AttributeDescriptor::new(" email ").unwrap().name(), "email");
    assert!(matches!(
        AttributeDescriptor::new(""),
        Err(Error::Configuration { .. })
    ));
}

#[test]
fn test_compares_by_name_only() {
    let name_attribute = AttributeDescriptor::new("first_name").unwrap();
    let cast_attribute = AttributeDescriptor::with_options(
        "first_name",
        &AttributeOptions::new().cast(CastType::Integer).key("other"),
    )
    .unwrap();

    assert_ne!(name_attribute, AttributeDescriptor::new("email").unwrap());
    assert_eq!(name_attribute, AttributeDescriptor::new("first_name").unwrap());
    assert_eq!(name_attribute, cast_attribute);
}

#[test]
fn test_cast_token_is_normalized() {
    let descriptor =
        AttributeDescriptor::with_options("email", &AttributeOptions::new().cast_token("array"))
            .unwrap();
    assert_eq!(descriptor.cast_type(), Some(CastType::Array));
}

#[test]
fn test_defaults_to_no_cast_and_own_key() {
    let descriptor = AttributeDescriptor::new("email").unwrap();
    assert_eq!(descriptor.cast_type(), None);
    assert!(matches!(descriptor.source(), ValueSource::Key(key) if key == "email"));
}

#[test]
fn test_unknown_cast_token_fails_at_declaration() {
    let err = AttributeDescriptor::with_options(
        "email",
        &AttributeOptions::new().cast_token("unknown_cast_type"),
    )
    .unwrap_err();

    match err {
        Error::UnsupportedCastType {
            cast_type,
            supported,
        } => {
            assert_eq!(cast_type, "unknown_cast_type");
            assert!(supported.contains(&"integer".to_string()));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_value_without_data_is_null() {
    let descriptor = AttributeDescriptor::new("email").unwrap();
    assert_eq!(descriptor.read(&EmptyContext).unwrap(), Value::Null);
}

#[test]
fn test_value_from_key() {
    let descriptor =
        AttributeDescriptor::with_options("email", &AttributeOptions::new().path("email")).unwrap();
    assert_eq!(read(&descriptor), json!("jane@example.com"));
}

#[test]
fn test_value_from_nested_path() {
    let descriptor = AttributeDescriptor::with_options(
        "username",
        &AttributeOptions::new().path("metadata.username"),
    )
    .unwrap();
    assert_eq!(read(&descriptor), json!("jane89"));
}

#[test]
fn test_value_from_method_reference() {
    let descriptor =
        AttributeDescriptor::with_options("full_name", &AttributeOptions::new().method("full_name"))
            .unwrap();
    assert_eq!(read(&descriptor), json!("Jane Joules"));
}

#[test]
fn test_method_reference_falls_back_to_root_key() {
    let descriptor = AttributeDescriptor::with_options(
        "first_name",
        &AttributeOptions::new().method("first_name"),
    )
    .unwrap();
    assert_eq!(read(&descriptor), json!("Jane"));
}

#[test]
fn test_value_from_static_expression() {
    let descriptor = AttributeDescriptor::with_options(
        "static",
        &AttributeOptions::new().expr(|_| json!("static")),
    )
    .unwrap();
    assert_eq!(read(&descriptor), json!("static"));
}

#[test]
fn test_value_from_dynamic_expression() {
    let descriptor = AttributeDescriptor::with_options(
        "first_name",
        &AttributeOptions::new().expr(|ctx| {
            ctx.raw_data()
                .map(|data| data["first_name"].clone())
                .unwrap_or(Value::Null)
        }),
    )
    .unwrap();
    assert_eq!(read(&descriptor), json!("Jane"));
}

#[test]
fn test_value_is_not_cast_without_cast_type() {
    let descriptor = AttributeDescriptor::new("id").unwrap();
    assert_eq!(read(&descriptor), json!(123));
}

#[test]
fn test_value_cast_to_string() {
    let descriptor =
        AttributeDescriptor::with_options("id", &AttributeOptions::new().cast(CastType::String))
            .unwrap();
    assert_eq!(read(&descriptor), json!("123"));
}

#[test]
fn test_value_cast_to_integer() {
    let descriptor = AttributeDescriptor::with_options(
        "user_profile_id",
        &AttributeOptions::new()
            .cast(CastType::Integer)
            .path("metadata.user_profile_id"),
    )
    .unwrap();
    let value = read(&descriptor);
    assert_eq!(value, json!(456));
    assert!(value.is_i64());
}

#[test]
fn test_value_cast_to_float() {
    let descriptor = AttributeDescriptor::with_options(
        "hour_rate",
        &AttributeOptions::new()
            .cast(CastType::Float)
            .path("metadata.hour_rate"),
    )
    .unwrap();
    assert!(read(&descriptor).is_f64());
}

#[test]
fn test_value_cast_to_decimal() {
    let descriptor = AttributeDescriptor::with_options(
        "hour_rate",
        &AttributeOptions::new()
            .cast_token("big_decimal")
            .path("metadata.hour_rate"),
    )
    .unwrap();
    assert_eq!(read(&descriptor).to_string(), "100.00");
}

#[test]
fn test_value_cast_to_array() {
    let descriptor =
        AttributeDescriptor::with_options("metadata", &AttributeOptions::new().cast(CastType::Array))
            .unwrap();
    assert!(read(&descriptor).is_array());
}

#[test]
fn test_value_cast_to_hash() {
    let descriptor = AttributeDescriptor::with_options(
        "first_name",
        &AttributeOptions::new().cast(CastType::Hash).expr(|ctx| {
            let first_name = ctx
                .raw_data()
                .map(|data| data["first_name"].clone())
                .unwrap_or(Value::Null);
            json!(["first_name", first_name])
        }),
    )
    .unwrap();
    assert_eq!(read(&descriptor), json!({"first_name": "Jane"}));
}

#[test]
fn test_cast_failure_names_attribute() {
    let descriptor = AttributeDescriptor::with_options(
        "username",
        &AttributeOptions::new()
            .cast(CastType::Integer)
            .path("metadata.username"),
    )
    .unwrap();

    let err = descriptor.read(&UserContext::new()).unwrap_err();
    assert!(matches!(err, Error::Cast { ref attribute, .. } if attribute == "username"));
}

#[test]
fn test_resolve_memoizes_per_slot() {
    let context = UserContext::new();
    let descriptor =
        AttributeDescriptor::with_options("full_name", &AttributeOptions::new().method("full_name"))
            .unwrap();
    let slot = OnceCell::new();

    let first = descriptor.resolve(&context, &slot).unwrap().clone();
    let second = descriptor.resolve(&context, &slot).unwrap().clone();

    assert_eq!(first, second);
    assert_eq!(context.full_name_calls.get(), 1);
}

#[test]
fn test_resolve_caches_null() {
    let context = UserContext::new();
    let descriptor = AttributeDescriptor::new("missing").unwrap();
    let slot = OnceCell::new();

    assert!(slot.get().is_none());
    assert_eq!(descriptor.resolve(&context, &slot).unwrap(), &Value::Null);
    assert_eq!(slot.get(), Some(&Value::Null));
}

#[test]
fn test_resolve_does_not_cache_failures() {
    let context = UserContext::new();
    let descriptor = AttributeDescriptor::with_options(
        "first_name",
        &AttributeOptions::new().cast(CastType::Float),
    )
    .unwrap();
    let slot = OnceCell::new();

    assert!(descriptor.resolve(&context, &slot).is_err());
    assert!(slot.get().is_none());
}

#[test]
fn test_schema_starts_empty() {
    let schema = SchemaDefinition::new();
    assert!(schema.is_empty());
    assert_eq!(schema.iter().count(), 0);
}

#[test]
fn test_adding_attributes() {
    let mut schema = SchemaDefinition::new();
    let email = AttributeDescriptor::new("email").unwrap();
    assert!(!schema.contains(&email));

    schema.attribute("email", AttributeOptions::new()).unwrap();
    assert!(schema.contains(&email));
    assert!(schema.contains_name(":email"));
}

#[test]
fn test_duplicate_declarations_keep_the_first() {
    let mut schema = SchemaDefinition::new();
    schema
        .attribute("email", AttributeOptions::new())
        .unwrap()
        .attribute("email", AttributeOptions::new().cast(CastType::Array).key("mail"))
        .unwrap();

    assert_eq!(schema.len(), 1);
    let kept = schema.get("email").unwrap();
    assert_eq!(kept.cast_type(), None);
    assert!(matches!(kept.source(), ValueSource::Key(key) if key == "email"));
}

#[test]
fn test_adding_multiple_attributes_at_once() {
    let mut schema = SchemaDefinition::new();
    schema
        .attributes(["first_name", "last_name"], AttributeOptions::new().cast(CastType::String))
        .unwrap();

    assert_eq!(schema.len(), 2);
    assert_eq!(schema.names().collect::<Vec<_>>(), vec!["first_name", "last_name"]);
    assert!(schema
        .iter()
        .all(|attribute| attribute.cast_type() == Some(CastType::String)));
}

#[test]
fn test_failed_bulk_declaration_inserts_nothing() {
    let mut schema = SchemaDefinition::new();
    let result = schema.attributes(["first_name", ""], AttributeOptions::new());

    assert!(result.is_err());
    assert!(schema.is_empty());
}

#[test]
fn test_default_cast_applies_to_uncast_attributes() {
    let mut schema = SchemaDefinition::new().with_default_cast(CastType::String);
    schema
        .attribute("id", AttributeOptions::new())
        .unwrap()
        .attribute("count", AttributeOptions::new().cast(CastType::Integer))
        .unwrap();

    assert_eq!(schema.get("id").unwrap().cast_type(), Some(CastType::String));
    assert_eq!(schema.get("count").unwrap().cast_type(), Some(CastType::Integer));
}

#[test]
fn test_position_follows_declaration_order() {
    let mut schema = SchemaDefinition::new();
    schema
        .attributes(["b", "a", "c"], AttributeOptions::new())
        .unwrap();

    assert_eq!(schema.position("b"), Some(0));
    assert_eq!(schema.position("c"), Some(2));
    assert_eq!(schema.position("z"), None);
}
