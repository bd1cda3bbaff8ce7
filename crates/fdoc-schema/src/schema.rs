//! # Schema
//!
//! Wraps one JSON Schema fragment: a request body or one response body
//! declared by an endpoint. A fragment is compiled once, at load time, so
//! a malformed schema fails the declaration that carries it instead of
//! surfacing on the first exchange.
//!
//! ## Absent schemas
//!
//! An endpoint may declare no schema for a body. What such a "no body"
//! declaration accepts is an explicit [`AbsentSchemaPolicy`]: any payload,
//! or only the absence of one. A JSON `null` payload counts as absent.
//!
//! ## Schema resolution
//!
//! Internal `$ref`s (`#/definitions/<name>`) resolve natively. Remote
//! `$ref` URIs are refused by a local-only retriever, so compiling a
//! fragment never touches the network.

use std::fmt;

use fdoc_core::AbsentSchemaPolicy;
use jsonschema::{Retrieve, Uri, ValidationOptions, Validator};
use serde_json::Value;

use crate::error::SchemaError;
use crate::violation::{Violation, Violations};

/// Retriever that refuses every external `$ref`.
struct LocalOnlyRetriever;

impl Retrieve for LocalOnlyRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external $ref not supported in fdoc schemas: {}", uri.as_str()).into())
    }
}

struct Compiled {
    fragment: Value,
    validator: Validator,
}

/// An immutable JSON Schema fragment, or the explicit absence of one.
///
/// `Schema` is `Send + Sync`; the compiled validator is shared read-only
/// across concurrent validations.
pub struct Schema {
    compiled: Option<Compiled>,
}

impl Schema {
    /// A schema that declares no body.
    pub fn absent() -> Self {
        Self { compiled: None }
    }

    /// Compile a fragment.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidFragment` if the fragment is not a
    /// valid JSON Schema.
    pub fn compile(fragment: Value) -> Result<Self, SchemaError> {
        let validator = build_options(&fragment).build(&fragment).map_err(|e| {
            SchemaError::InvalidFragment {
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            compiled: Some(Compiled {
                fragment,
                validator,
            }),
        })
    }

    /// Compile `fragment` when present, otherwise return [`Schema::absent`].
    pub fn from_optional(fragment: Option<Value>) -> Result<Self, SchemaError> {
        match fragment {
            Some(fragment) => Self::compile(fragment),
            None => Ok(Self::absent()),
        }
    }

    /// Whether a fragment was declared.
    pub fn is_present(&self) -> bool {
        self.compiled.is_some()
    }

    /// The declared fragment, for presentation.
    pub fn fragment(&self) -> Option<&Value> {
        self.compiled.as_ref().map(|c| &c.fragment)
    }

    /// Validate `payload` against this schema.
    ///
    /// `None` and `Some(Value::Null)` both mean "no body". Every violation
    /// is collected; validation never stops at the first.
    pub fn validate(&self, payload: Option<&Value>, policy: AbsentSchemaPolicy) -> Violations {
        let payload = payload.filter(|v| !v.is_null());

        let Some(compiled) = &self.compiled else {
            return match (policy, payload) {
                (AbsentSchemaPolicy::RequireEmpty, Some(_)) => std::iter::once(
                    Violation::at_root("", "no body is declared but one was present"),
                )
                .collect(),
                _ => Violations::none(),
            };
        };

        let instance = payload.unwrap_or(&Value::Null);
        compiled
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect()
    }

    /// Names listed in the fragment's top-level `required` array.
    pub fn required_properties(&self) -> Vec<&str> {
        self.fragment()
            .and_then(|f| f.get("required"))
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("fragment", &self.fragment())
            .finish()
    }
}

/// Fragments without `$schema` are read as Draft 2020-12; a fragment that
/// names its draft is compiled with that draft.
fn build_options(fragment: &Value) -> ValidationOptions {
    let mut opts = jsonschema::options();
    if fragment.get("$schema").is_none() {
        opts.with_draft(jsonschema::Draft::Draft202012);
    }
    opts.with_retriever(LocalOnlyRetriever);
    opts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn widget_schema() -> Schema {
        Schema::compile(json!({
            "type": "object",
            "required": ["id", "name"],
            "properties": {
                "id": { "type": "integer" },
                "name": { "type": "string" }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_matching_payload_has_no_violations() {
        let schema = widget_schema();
        let body = json!({ "id": 42, "name": "sprocket" });
        assert!(schema
            .validate(Some(&body), AbsentSchemaPolicy::AcceptAny)
            .is_empty());
    }

    #[test]
    fn test_missing_required_field_is_reported() {
        let schema = widget_schema();
        let body = json!({ "id": 42 });
        let violations = schema.validate(Some(&body), AbsentSchemaPolicy::AcceptAny);
        assert_eq!(violations.len(), 1);
        assert!(violations.violations()[0].message.contains("name"));
    }

    #[test]
    fn test_all_violations_are_collected() {
        let schema = widget_schema();
        let body = json!({ "id": "forty-two", "name": 7 });
        let violations = schema.validate(Some(&body), AbsentSchemaPolicy::AcceptAny);
        assert_eq!(violations.len(), 2);
        let paths: Vec<&str> = violations
            .iter()
            .map(|v| v.instance_path.as_str())
            .collect();
        assert!(paths.contains(&"/id"));
        assert!(paths.contains(&"/name"));
    }

    #[test]
    fn test_present_schema_rejects_missing_body() {
        let schema = widget_schema();
        assert!(!schema.validate(None, AbsentSchemaPolicy::AcceptAny).is_empty());
    }

    #[test]
    fn test_absent_schema_accept_any() {
        let schema = Schema::absent();
        let body = json!({ "anything": true });
        assert!(schema.validate(Some(&body), AbsentSchemaPolicy::AcceptAny).is_empty());
        assert!(schema.validate(None, AbsentSchemaPolicy::AcceptAny).is_empty());
    }

    #[test]
    fn test_absent_schema_require_empty() {
        let schema = Schema::absent();
        let body = json!({ "anything": true });
        assert_eq!(
            schema
                .validate(Some(&body), AbsentSchemaPolicy::RequireEmpty)
                .len(),
            1
        );
        assert!(schema.validate(None, AbsentSchemaPolicy::RequireEmpty).is_empty());
        assert!(schema
            .validate(Some(&Value::Null), AbsentSchemaPolicy::RequireEmpty)
            .is_empty());
    }

    #[test]
    fn test_malformed_fragment_fails_at_compile() {
        let err = Schema::compile(json!({ "type": 12 })).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidFragment { .. }));
    }

    #[test]
    fn test_internal_ref_resolves() {
        let schema = Schema::compile(json!({
            "$defs": { "id": { "type": "integer" } },
            "type": "object",
            "properties": { "id": { "$ref": "#/$defs/id" } }
        }))
        .unwrap();
        let bad = json!({ "id": "x" });
        assert_eq!(schema.validate(Some(&bad), AbsentSchemaPolicy::AcceptAny).len(), 1);
    }

    #[test]
    fn test_required_properties() {
        assert_eq!(widget_schema().required_properties(), vec!["id", "name"]);
        assert!(Schema::absent().required_properties().is_empty());
    }

    #[test]
    fn test_fragment_roundtrip() {
        let fragment = json!({ "type": "string" });
        let schema = Schema::compile(fragment.clone()).unwrap();
        assert_eq!(schema.fragment(), Some(&fragment));
        assert!(schema.is_present());
        assert!(!Schema::absent().is_present());
    }
}
