//! # Validator
//!
//! Checks one [`Exchange`] against a loaded service graph.
//!
//! ## Design
//!
//! 1. **Resolve.** Services are tried longest base path first; within a
//!    service the first matching endpoint wins. No match ends validation
//!    with [`Outcome::EndpointNotFound`].
//! 2. **Response code.** A status the endpoint does not declare ends
//!    validation with [`Outcome::UndocumentedResponseCode`]. This verdict
//!    always fails and the hook is not asked.
//! 3. **Bodies.** The request body (when enabled) and the response body are
//!    validated; every violation is collected.
//! 4. **Decide.** The configured [`DecisionHook`] turns the facts into
//!    pass/fail. Hook errors and panics fall back to [`DefaultPolicy`].
//!
//! The model is borrowed read-only and the validator holds no mutable
//! state, so one instance can serve concurrent callers.

use std::panic::{catch_unwind, AssertUnwindSafe};

use fdoc_core::{FdocResult, HttpMethod};
use fdoc_model::{Endpoint, MetaService, Service};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ValidatorConfig;
use crate::decision::{DecisionFacts, DecisionHook, DefaultPolicy};
use crate::exchange::Exchange;
use crate::verdict::{BodyKind, Diagnostic, Outcome, Verdict};

/// Validation engine over a set of services.
#[derive(Debug)]
pub struct Validator<'a> {
    services: Vec<&'a Service>,
    config: ValidatorConfig,
}

impl<'a> Validator<'a> {
    /// Validate against `services`. Longer base paths are tried first;
    /// equal lengths keep the given order.
    pub fn new(services: impl IntoIterator<Item = &'a Service>, config: ValidatorConfig) -> Self {
        let mut services: Vec<&'a Service> = services.into_iter().collect();
        services.sort_by_key(|s| std::cmp::Reverse(s.base_path().len()));
        Self { services, config }
    }

    /// Validate against a single service.
    pub fn for_service(service: &'a Service, config: ValidatorConfig) -> Self {
        Self::new([service], config)
    }

    /// Validate against the services of one version of `meta` (the default
    /// version when `None`).
    ///
    /// # Errors
    ///
    /// `UnknownVersion` when `version` was not discovered.
    pub fn for_meta_service(
        meta: &'a MetaService,
        version: Option<&str>,
        config: ValidatorConfig,
    ) -> FdocResult<Self> {
        Ok(Self::new(meta.services(version)?, config))
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Service and endpoint answering `method` on `url`.
    pub fn resolve(&self, method: HttpMethod, url: &str) -> Option<(&'a Service, &'a Endpoint)> {
        self.services
            .iter()
            .copied()
            .filter(|s| s.owns(url))
            .find_map(|s| s.find_endpoint(method, url).map(|e| (s, e)))
    }

    /// Validate a response without a recorded request body.
    pub fn validate_response(
        &self,
        method: HttpMethod,
        url: &str,
        status_code: u16,
        response_body: Option<Value>,
    ) -> Verdict {
        let mut exchange = Exchange::new(method, url, status_code);
        exchange.response_body = response_body;
        self.validate(&exchange)
    }

    /// Validate one exchange.
    pub fn validate(&self, exchange: &Exchange) -> Verdict {
        let mut verdict = Verdict {
            method: exchange.method,
            url: exchange.url.clone(),
            status: exchange.status_code,
            service: None,
            endpoint: None,
            outcome: Outcome::EndpointNotFound,
            documented: false,
            success: false,
        };

        let Some((service, endpoint)) = self.resolve(exchange.method, &exchange.url) else {
            debug!(method = %exchange.method, url = %exchange.url, "no endpoint answers exchange");
            verdict.success = self.decide(exchange, false, &[]);
            return verdict;
        };
        verdict.service = Some(service.slug_name().to_string());
        verdict.endpoint = Some(service.endpoint_url(endpoint));

        let Some(response) = endpoint.response_code(exchange.status_code) else {
            warn!(
                method = %exchange.method,
                url = %exchange.url,
                status = exchange.status_code,
                endpoint = %endpoint.source().display(),
                "undocumented response code"
            );
            verdict.outcome = Outcome::UndocumentedResponseCode {
                status: exchange.status_code,
            };
            return verdict;
        };

        let policy = self.config.absent_schema_policy;
        let mut diagnostics = Vec::new();
        if self.config.validate_requests {
            let request = endpoint
                .request_schema()
                .validate(exchange.request_body.as_ref(), policy);
            diagnostics.extend(tag(BodyKind::Request, request));
        }
        let body = response.validate(exchange.response_body.as_ref(), policy);
        diagnostics.extend(tag(BodyKind::Response, body));

        verdict.documented = true;
        verdict.success = self.decide(exchange, true, &diagnostics);
        verdict.outcome = if diagnostics.is_empty() {
            Outcome::Ok
        } else {
            debug!(
                method = %exchange.method,
                url = %exchange.url,
                violations = diagnostics.len(),
                "schema violations"
            );
            Outcome::SchemaViolations(diagnostics)
        };
        verdict
    }

    fn decide(&self, exchange: &Exchange, documented: bool, diagnostics: &[Diagnostic]) -> bool {
        let facts = DecisionFacts {
            exchange,
            documented,
            diagnostics,
        };
        let hook = self.config.hook();
        match catch_unwind(AssertUnwindSafe(|| DecisionHook::decide(hook, &facts))) {
            Ok(Ok(decision)) => decision,
            Ok(Err(err)) => {
                warn!(error = %err, "decision hook failed, using default policy");
                DefaultPolicy::verdict(&facts)
            }
            Err(_) => {
                warn!("decision hook panicked, using default policy");
                DefaultPolicy::verdict(&facts)
            }
        }
    }
}

fn tag(body: BodyKind, violations: fdoc_schema::Violations) -> impl Iterator<Item = Diagnostic> {
    violations
        .into_iter()
        .map(move |violation| Diagnostic { body, violation })
}
