//! # Endpoint
//!
//! One declaration file: URL pattern, verb, request schema and the ordered
//! set of response codes. Built once from a [`EndpointDeclaration`] and
//! read-only afterwards.

use std::path::{Path, PathBuf};

use fdoc_core::{FdocError, FdocResult, HttpMethod};
use fdoc_schema::{ResponseCode, Schema};
use serde_json::Value;
use tracing::debug;

use crate::declaration::{parse_endpoint, DeclarationError, EndpointDeclaration};
use crate::fs::read_source;
use crate::path::UrlPattern;

/// A loaded endpoint declaration.
#[derive(Debug)]
pub struct Endpoint {
    source: PathBuf,
    url: UrlPattern,
    method: HttpMethod,
    title: String,
    description: String,
    deprecated: bool,
    request: Schema,
    responses: Vec<ResponseCode>,
    examples: Vec<Value>,
}

impl Endpoint {
    /// Load and parse one declaration file.
    ///
    /// # Errors
    ///
    /// `MalformedDeclaration` when the file is not well-formed, misses
    /// `url`/`method` or carries a schema that does not compile;
    /// `DuplicateResponseCode` when a status is declared twice; `Io` when
    /// the file cannot be read.
    pub fn load(path: &Path) -> FdocResult<Self> {
        let source = read_source(path)?;
        Self::parse(path, &source)
    }

    /// Parse declaration text. `path` is used for error context and
    /// recorded as the endpoint's source.
    pub fn parse(path: &Path, source: &str) -> FdocResult<Self> {
        let declaration = parse_endpoint(source).map_err(|e| match e {
            DeclarationError::DuplicateResponseCode(status) => FdocError::DuplicateResponseCode {
                path: path.to_path_buf(),
                status,
            },
            other => FdocError::malformed(path, other.to_string()),
        })?;
        Self::from_declaration(path, declaration)
    }

    /// Build an endpoint from a well-formed declaration, compiling every
    /// schema it carries.
    pub fn from_declaration(path: &Path, declaration: EndpointDeclaration) -> FdocResult<Self> {
        let url = UrlPattern::parse(&declaration.url)
            .map_err(|e| FdocError::malformed(path, e.to_string()))?;

        let request = Schema::from_optional(declaration.request)
            .map_err(|e| FdocError::malformed(path, format!("request schema: {e}")))?;

        let responses = declaration
            .responses
            .into_iter()
            .map(|r| {
                let schema = Schema::from_optional(r.schema).map_err(|e| {
                    FdocError::malformed(path, format!("response {} schema: {e}", r.status))
                })?;
                let code = ResponseCode::new(r.status, r.description, schema);
                Ok(match r.successful {
                    Some(successful) => code.with_successful(successful),
                    None => code,
                })
            })
            .collect::<FdocResult<Vec<_>>>()?;

        debug!(
            path = %path.display(),
            method = %declaration.method,
            url = %url,
            responses = responses.len(),
            "loaded endpoint"
        );

        Ok(Self {
            source: path.to_path_buf(),
            url,
            method: declaration.method,
            title: declaration.title,
            description: declaration.description,
            deprecated: declaration.deprecated,
            request,
            responses,
            examples: declaration.examples,
        })
    }

    /// File the endpoint was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// URL pattern, relative to the owning service's base path.
    pub fn url(&self) -> &UrlPattern {
        &self.url
    }

    /// HTTP verb.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Short title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-text description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the endpoint is marked deprecated.
    pub fn deprecated(&self) -> bool {
        self.deprecated
    }

    /// Request body schema.
    pub fn request_schema(&self) -> &Schema {
        &self.request
    }

    /// Response codes in declaration order.
    pub fn response_codes(&self) -> &[ResponseCode] {
        &self.responses
    }

    /// Response codes marked successful.
    pub fn successful_response_codes(&self) -> impl Iterator<Item = &ResponseCode> {
        self.responses.iter().filter(|r| r.successful())
    }

    /// Response codes marked unsuccessful.
    pub fn failure_response_codes(&self) -> impl Iterator<Item = &ResponseCode> {
        self.responses.iter().filter(|r| !r.successful())
    }

    /// Free-form examples.
    pub fn examples(&self) -> &[Value] {
        &self.examples
    }

    /// Look up a declared response by status.
    pub fn response_code(&self, status: u16) -> Option<&ResponseCode> {
        self.responses.iter().find(|r| r.status() == status)
    }

    /// Whether this endpoint answers `method` on `path`. `path` is relative
    /// to the service base path.
    pub fn matches(&self, method: HttpMethod, path: &str) -> bool {
        self.method == method && self.url.matches(path)
    }

    /// Identity within a service: verb plus parameter-erased URL.
    pub fn identity(&self) -> (HttpMethod, String) {
        (self.method, self.url.canonical())
    }
}
