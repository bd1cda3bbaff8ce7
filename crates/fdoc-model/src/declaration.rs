//! # Declaration Parsing
//!
//! The parse step between raw declaration text and model objects. Source
//! text becomes either a well-formed typed declaration or a
//! [`DeclarationError`]; no `Endpoint`, `Service` or `MetaService` is
//! constructed from anything that did not pass through here.
//!
//! ## Endpoint declaration (`*.fdoc`)
//!
//! ```yaml
//! url: /widgets/{id}
//! method: GET
//! title: Fetch a widget
//! description: Returns one widget.
//! deprecated: false
//! request:            # optional JSON Schema fragment
//!   type: object
//! responses:
//!   200:
//!     description: The widget.
//!     schema: { type: object, required: [id] }
//!   404:
//!     description: No such widget.
//! examples:
//!   - { id: 42 }
//! ```
//!
//! Response keys may be YAML integers or strings. Their order is kept.
//!
//! ## Service manifest (`*.fdoc.service`) and meta manifest (`*.fdoc.meta`)
//!
//! Optional YAML mappings carrying `name`, `description` and, for
//! services, `basePath` and `discussion`.

use std::collections::HashSet;

use fdoc_core::HttpMethod;
use fdoc_schema::{key_to_string, yaml_to_json, SchemaError};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Suffix of endpoint declaration files.
pub const ENDPOINT_SUFFIX: &str = ".fdoc";
/// Suffix of the optional service manifest.
pub const SERVICE_MANIFEST_SUFFIX: &str = ".fdoc.service";
/// Suffix of the optional meta-service manifest.
pub const META_MANIFEST_SUFFIX: &str = ".fdoc.meta";

/// Why a declaration is malformed.
#[derive(Error, Debug)]
pub enum DeclarationError {
    /// Not parseable as YAML.
    #[error("invalid YAML: {0}")]
    Syntax(String),
    /// The document is not a mapping.
    #[error("declaration must be a mapping")]
    NotAMapping,
    /// A required field is absent or empty.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    /// A field has the wrong shape.
    #[error("invalid field `{field}`: {reason}")]
    InvalidField {
        /// Field name.
        field: String,
        /// What is wrong.
        reason: String,
    },
    /// Two response keys name the same status.
    #[error("duplicate response code {0}")]
    DuplicateResponseCode(u16),
    /// YAML with no JSON equivalent.
    #[error(transparent)]
    Conversion(#[from] SchemaError),
}

/// A well-formed endpoint declaration, before schemas are compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointDeclaration {
    /// URL pattern as written.
    pub url: String,
    /// HTTP verb.
    pub method: HttpMethod,
    /// Short title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Whether the endpoint is deprecated.
    pub deprecated: bool,
    /// Request body schema fragment.
    pub request: Option<Value>,
    /// Responses in declaration order.
    pub responses: Vec<ResponseDeclaration>,
    /// Free-form examples.
    pub examples: Vec<Value>,
}

/// One entry of `responses`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDeclaration {
    /// HTTP status, 100..=599.
    pub status: u16,
    /// Free-text description.
    pub description: String,
    /// Explicit success flag, if declared.
    pub successful: Option<bool>,
    /// Body schema fragment.
    pub schema: Option<Value>,
}

#[derive(Deserialize)]
struct RawEndpoint {
    url: Option<String>,
    method: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    deprecated: bool,
    #[serde(default)]
    request: Option<Value>,
    #[serde(default)]
    examples: Vec<Value>,
}

#[derive(Deserialize)]
struct RawResponse {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    successful: Option<bool>,
    #[serde(default)]
    schema: Option<Value>,
}

/// Service manifest contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceManifest {
    /// Display name; the slug when absent.
    pub name: Option<String>,
    /// Path prefix shared by every endpoint of the service.
    #[serde(rename = "basePath", alias = "base_path")]
    pub base_path: String,
    /// Short description.
    pub description: String,
    /// Longer discussion text.
    pub discussion: String,
}

/// Meta-service manifest contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MetaManifest {
    /// Display name; the root slug when absent.
    pub name: Option<String>,
    /// Free-text description.
    pub description: String,
}

/// Parse the text of one endpoint declaration.
pub fn parse_endpoint(source: &str) -> Result<EndpointDeclaration, DeclarationError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(source).map_err(|e| DeclarationError::Syntax(e.to_string()))?;
    let mapping = yaml.as_mapping().ok_or(DeclarationError::NotAMapping)?;

    let responses = match mapping.get("responses") {
        None | Some(serde_yaml::Value::Null) => Vec::new(),
        Some(serde_yaml::Value::Mapping(entries)) => parse_responses(entries)?,
        Some(_) => {
            return Err(DeclarationError::InvalidField {
                field: "responses".to_string(),
                reason: "expected a mapping from status code to response".to_string(),
            })
        }
    };

    let raw: RawEndpoint = serde_json::from_value(yaml_to_json(&yaml)?).map_err(|e| {
        DeclarationError::InvalidField {
            field: "endpoint".to_string(),
            reason: e.to_string(),
        }
    })?;

    let url = required(raw.url, "url")?;
    let method = required(raw.method, "method")?
        .parse::<HttpMethod>()
        .map_err(|e| DeclarationError::InvalidField {
            field: "method".to_string(),
            reason: e.to_string(),
        })?;

    Ok(EndpointDeclaration {
        url,
        method,
        title: raw.title.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        deprecated: raw.deprecated,
        request: raw.request.filter(|v| !v.is_null()),
        responses,
        examples: raw.examples,
    })
}

/// Parse a service manifest. Blank text is an empty manifest.
pub fn parse_service_manifest(source: &str) -> Result<ServiceManifest, DeclarationError> {
    parse_manifest(source)
}

/// Parse a meta-service manifest. Blank text is an empty manifest.
pub fn parse_meta_manifest(source: &str) -> Result<MetaManifest, DeclarationError> {
    parse_manifest(source)
}

fn parse_manifest<T>(source: &str) -> Result<T, DeclarationError>
where
    T: Default + for<'de> Deserialize<'de>,
{
    if source.trim().is_empty() {
        return Ok(T::default());
    }
    serde_yaml::from_str(source).map_err(|e| DeclarationError::Syntax(e.to_string()))
}

fn parse_responses(
    entries: &serde_yaml::Mapping,
) -> Result<Vec<ResponseDeclaration>, DeclarationError> {
    let mut seen = HashSet::new();
    let mut responses = Vec::with_capacity(entries.len());

    for (key, value) in entries {
        let key = key_to_string(key)?;
        let status = parse_status(&key)?;
        if !seen.insert(status) {
            return Err(DeclarationError::DuplicateResponseCode(status));
        }

        let raw: RawResponse = match value {
            serde_yaml::Value::Null => RawResponse {
                description: None,
                successful: None,
                schema: None,
            },
            other => serde_json::from_value(yaml_to_json(other)?).map_err(|e| {
                DeclarationError::InvalidField {
                    field: format!("responses.{status}"),
                    reason: e.to_string(),
                }
            })?,
        };

        responses.push(ResponseDeclaration {
            status,
            description: raw.description.unwrap_or_default(),
            successful: raw.successful,
            schema: raw.schema.filter(|v| !v.is_null()),
        });
    }

    Ok(responses)
}

fn parse_status(key: &str) -> Result<u16, DeclarationError> {
    let invalid = |reason: &str| DeclarationError::InvalidField {
        field: format!("responses.{key}"),
        reason: reason.to_string(),
    };
    let status: u16 = key
        .trim()
        .parse()
        .map_err(|_| invalid("status code must be an integer"))?;
    if !(100..=599).contains(&status) {
        return Err(invalid("status code must be within 100..=599"));
    }
    Ok(status)
}

fn required(value: Option<String>, field: &'static str) -> Result<String, DeclarationError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(DeclarationError::MissingField(field))
}
