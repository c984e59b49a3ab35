//! Schema generation for strict structured outputs.
//!
//! `schemars` produces draft-07 schemas with a `definitions` section and
//! `$ref` pointers. The structured-output endpoint's strict mode wants
//! something narrower: every object closed with `additionalProperties:
//! false`, every property listed in `required` (optionality is expressed
//! through nullable types, not through omission), and no `$ref`
//! indirection at all. This module derives the schemars schema for a type
//! and rewrites it into that form.

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Trait for types usable as a structured-output target.
///
/// Blanket-implemented for any `JsonSchema + DeserializeOwned` type.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate the strict-mode schema for this type.
    fn structured_schema() -> Value {
        let schema = schema_for!(Self);
        let mut root = serde_json::to_value(schema).unwrap_or_default();
        to_strict_schema(&mut root);
        root
    }

    /// The schemars name of this type.
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Rewrite a schemars draft-07 schema into strict-mode form, in place.
fn to_strict_schema(root: &mut Value) {
    // Definitions are needed while resolving refs, so pull them out before
    // stripping the schema down.
    let definitions = root
        .as_object()
        .and_then(|map| map.get("definitions").cloned())
        .unwrap_or(Value::Null);

    close_objects(root);

    if !definitions.is_null() {
        // The definition bodies themselves still carry open objects.
        let mut definitions = definitions;
        close_objects(&mut definitions);
        resolve_refs(root, &definitions);
    }

    if let Value::Object(map) = root {
        map.remove("definitions");
        map.remove("$schema");
    }
}

/// Recursively close every object schema: `additionalProperties: false`
/// and all properties required.
fn close_objects(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.get("type") == Some(&Value::String("object".into())) {
                map.insert("additionalProperties".into(), Value::Bool(false));

                if let Some(Value::Object(props)) = map.get("properties") {
                    let all: Vec<Value> = props.keys().map(|k| Value::String(k.clone())).collect();
                    map.insert("required".into(), Value::Array(all));
                }
            }

            for nested in map.values_mut() {
                close_objects(nested);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                close_objects(item);
            }
        }
        _ => {}
    }
}

/// Recursively replace `{"$ref": "#/definitions/Name"}` nodes with the
/// referenced definition body.
fn resolve_refs(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(pointer)) = map.get("$ref") {
                if let Some(name) = pointer.strip_prefix("#/definitions/") {
                    if let Some(body) = definitions.get(name) {
                        *value = body.clone();
                        // The inlined body may itself reference other definitions.
                        resolve_refs(value, definitions);
                        return;
                    }
                }
            }

            for nested in map.values_mut() {
                resolve_refs(nested, definitions);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                resolve_refs(item, definitions);
            }
        }
        _ => {}
    }
}
