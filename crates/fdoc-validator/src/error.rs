//! # Validation Failures
//!
//! Validation-time errors, as returned by
//! [`Verdict::into_result`](crate::Verdict::into_result). Each variant
//! carries the method, URL and status needed to locate the stale
//! declaration.

use fdoc_core::HttpMethod;
use thiserror::Error;

use crate::verdict::Diagnostic;

/// Why an exchange failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    /// No declaration answers the request.
    #[error("no documented endpoint for {method} {url}")]
    EndpointNotFound {
        method: HttpMethod,
        url: String,
    },

    /// The endpoint never declares the returned status.
    #[error("{method} {url} returned undocumented response code {status} (endpoint {endpoint})")]
    UndocumentedResponseCode {
        method: HttpMethod,
        url: String,
        status: u16,
        /// Full URL pattern of the matched endpoint.
        endpoint: String,
    },

    /// At least one body does not conform to its schema.
    #[error(
        "{method} {url} -> {status}: {} schema violation(s){}",
        .diagnostics.len(),
        render(.diagnostics)
    )]
    SchemaViolations {
        method: HttpMethod,
        url: String,
        status: u16,
        diagnostics: Vec<Diagnostic>,
    },

    /// The decision hook failed a documented, schema-valid exchange.
    #[error("{method} {url} -> {status}: rejected by decision policy")]
    Rejected {
        method: HttpMethod,
        url: String,
        status: u16,
    },
}

fn render(diagnostics: &[Diagnostic]) -> String {
    diagnostics.iter().map(|d| format!("\n  {d}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::BodyKind;
    use fdoc_schema::Violation;

    #[test]
    fn test_undocumented_message_names_everything() {
        let err = ValidationFailure::UndocumentedResponseCode {
            method: HttpMethod::Get,
            url: "/widgets/42".to_string(),
            status: 500,
            endpoint: "/widgets/{id}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "GET /widgets/42 returned undocumented response code 500 (endpoint /widgets/{id})"
        );
    }

    #[test]
    fn test_schema_violations_message_lists_each() {
        let err = ValidationFailure::SchemaViolations {
            method: HttpMethod::Post,
            url: "/widgets".to_string(),
            status: 201,
            diagnostics: vec![
                Diagnostic {
                    body: BodyKind::Request,
                    violation: Violation::at_root("/required", "\"name\" is a required property"),
                },
                Diagnostic {
                    body: BodyKind::Response,
                    violation: Violation {
                        instance_path: "/id".to_string(),
                        schema_path: "/properties/id/type".to_string(),
                        message: "\"x\" is not of type \"integer\"".to_string(),
                    },
                },
            ],
        };
        let text = err.to_string();
        assert!(text.starts_with("POST /widgets -> 201: 2 schema violation(s)"));
        assert!(text.contains("\n  request body: (root): \"name\" is a required property"));
        assert!(text.contains("\n  response body: /id: \"x\" is not of type \"integer\""));
    }
}
