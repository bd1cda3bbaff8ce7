//! Response codes.
//!
//! A `ResponseCode` pairs an HTTP status with the schema of the body sent
//! with it. It is the atomic unit the validator checks an exchange
//! against: a status without a `ResponseCode` is undocumented.

use fdoc_core::AbsentSchemaPolicy;
use serde_json::Value;

use crate::schema::Schema;
use crate::violation::Violations;

/// One declared response status of an endpoint.
#[derive(Debug)]
pub struct ResponseCode {
    status: u16,
    description: String,
    successful: bool,
    schema: Schema,
}

impl ResponseCode {
    /// Create a response code.
    ///
    /// `successful` defaults from the status class: 1xx through 3xx are
    /// successful, 4xx and 5xx are not. Use [`ResponseCode::with_successful`]
    /// to override.
    pub fn new(status: u16, description: impl Into<String>, schema: Schema) -> Self {
        Self {
            status,
            description: description.into(),
            successful: status < 400,
            schema,
        }
    }

    /// Override whether this status counts as a success.
    pub fn with_successful(mut self, successful: bool) -> Self {
        self.successful = successful;
        self
    }

    /// The numeric status.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Free-text description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the declaration marks this status as a success.
    pub fn successful(&self) -> bool {
        self.successful
    }

    /// The body schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Status line as presenters show it, e.g. `200 OK`.
    pub fn status_line(&self) -> String {
        match reason_phrase(self.status) {
            Some(reason) => format!("{} {reason}", self.status),
            None => self.status.to_string(),
        }
    }

    /// Validate a response body against this code's schema.
    pub fn validate(&self, body: Option<&Value>, policy: AbsentSchemaPolicy) -> Violations {
        self.schema.validate(body, policy)
    }
}

impl PartialEq for ResponseCode {
    fn eq(&self, other: &Self) -> bool {
        self.status == other.status
    }
}

impl Eq for ResponseCode {}

/// Standard reason phrase for common statuses.
pub fn reason_phrase(status: u16) -> Option<&'static str> {
    let phrase = match status {
        100 => "Continue",
        101 => "Switching Protocols",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        206 => "Partial Content",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        409 => "Conflict",
        410 => "Gone",
        412 => "Precondition Failed",
        413 => "Payload Too Large",
        415 => "Unsupported Media Type",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => return None,
    };
    Some(phrase)
}
