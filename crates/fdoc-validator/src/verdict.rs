//! # Verdicts
//!
//! The transient result of validating one exchange. A [`Verdict`] is
//! produced per call and never cached.

use std::fmt;

use fdoc_core::HttpMethod;
use fdoc_schema::Violation;

use crate::error::ValidationFailure;

/// Which body a diagnostic was raised against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Request,
    Response,
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request => f.write_str("request body"),
            Self::Response => f.write_str("response body"),
        }
    }
}

/// One schema violation, tagged with the body it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub body: BodyKind,
    pub violation: Violation,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.body, self.violation)
    }
}

/// What validation found, independent of the pass/fail decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No service/endpoint answers the exchange's method and URL.
    EndpointNotFound,
    /// The endpoint exists but never declares the returned status.
    UndocumentedResponseCode { status: u16 },
    /// Documented, but at least one body does not conform.
    SchemaViolations(Vec<Diagnostic>),
    /// Documented and every body conforms.
    Ok,
}

impl Outcome {
    /// Short machine-friendly label.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EndpointNotFound => "endpoint_not_found",
            Self::UndocumentedResponseCode { .. } => "undocumented_response_code",
            Self::SchemaViolations(_) => "schema_violations",
            Self::Ok => "ok",
        }
    }
}

/// Result of validating one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Request verb.
    pub method: HttpMethod,
    /// Request URL as given.
    pub url: String,
    /// Response status.
    pub status: u16,
    /// Slug of the service that answered, when one did.
    pub service: Option<String>,
    /// Full URL pattern of the matched endpoint, when one did.
    pub endpoint: Option<String>,
    /// What validation found.
    pub outcome: Outcome,
    /// Endpoint found and status declared.
    pub documented: bool,
    /// Final pass/fail, as decided by the configured policy.
    pub success: bool,
}

impl Verdict {
    /// Schema diagnostics, empty unless the outcome is
    /// [`Outcome::SchemaViolations`].
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match &self.outcome {
            Outcome::SchemaViolations(diagnostics) => diagnostics,
            _ => &[],
        }
    }

    /// True when no body violated its schema.
    pub fn schema_valid(&self) -> bool {
        self.diagnostics().is_empty()
    }

    /// Convert a failed verdict into its error.
    ///
    /// An undocumented response code is always an error. Other outcomes
    /// are errors only when the policy decided against them.
    pub fn into_result(self) -> Result<Verdict, ValidationFailure> {
        if let Outcome::UndocumentedResponseCode { status } = self.outcome {
            return Err(ValidationFailure::UndocumentedResponseCode {
                method: self.method,
                url: self.url,
                status,
                endpoint: self.endpoint.unwrap_or_default(),
            });
        }
        if self.success {
            return Ok(self);
        }
        Err(match self.outcome {
            Outcome::EndpointNotFound => ValidationFailure::EndpointNotFound {
                method: self.method,
                url: self.url,
            },
            Outcome::SchemaViolations(diagnostics) => ValidationFailure::SchemaViolations {
                method: self.method,
                url: self.url,
                status: self.status,
                diagnostics,
            },
            Outcome::Ok | Outcome::UndocumentedResponseCode { .. } => ValidationFailure::Rejected {
                method: self.method,
                url: self.url,
                status: self.status,
            },
        })
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.success { "PASS" } else { "FAIL" };
        write!(f, "{mark} {} {} -> {}: {}", self.method, self.url, self.status, self.outcome.kind())?;
        if let Some(endpoint) = &self.endpoint {
            match &self.service {
                Some(service) => write!(f, " [{service} {endpoint}]")?,
                None => write!(f, " [{endpoint}]")?,
            }
        }
        for diagnostic in self.diagnostics() {
            write!(f, "\n  {diagnostic}")?;
        }
        Ok(())
    }
}
