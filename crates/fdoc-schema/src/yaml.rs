//! YAML to JSON conversion.
//!
//! Declarations are written in YAML but schemas and payloads are JSON.
//! Declarations use only the JSON-compatible subset of YAML; tags are
//! dropped and scalar mapping keys are stringified, so `200:` and `"200":`
//! both become the key `"200"`.

use serde_json::Value;

use crate::error::SchemaError;

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
pub fn yaml_to_json(yaml: &serde_yaml::Value) -> Result<Value, SchemaError> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => number_to_json(n),
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut object = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                object.insert(key_to_string(k)?, yaml_to_json(v)?);
            }
            Ok(Value::Object(object))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}

/// Render a scalar YAML mapping key as a JSON object key.
pub fn key_to_string(key: &serde_yaml::Value) -> Result<String, SchemaError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Tagged(tagged) => key_to_string(&tagged.value),
        other => Err(SchemaError::Conversion(format!(
            "unsupported YAML map key: {other:?}"
        ))),
    }
}

fn number_to_json(n: &serde_yaml::Number) -> Result<Value, SchemaError> {
    if let Some(i) = n.as_i64() {
        Ok(Value::from(i))
    } else if let Some(u) = n.as_u64() {
        Ok(Value::from(u))
    } else if let Some(f) = n.as_f64() {
        serde_json::Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| SchemaError::Conversion(format!("cannot represent {f} in JSON")))
    } else {
        Err(SchemaError::Conversion(format!("unsupported YAML number: {n:?}")))
    }
}
