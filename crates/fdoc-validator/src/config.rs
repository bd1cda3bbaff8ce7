//! Validator configuration.

use std::fmt;
use std::sync::Arc;

use fdoc_core::{AbsentSchemaPolicy, FdocConfig};

use crate::decision::{AdvisoryPolicy, DecisionFacts, DecisionHook, DefaultPolicy};

/// How a [`Validator`](crate::Validator) checks exchanges and who decides
/// the final verdict.
#[derive(Clone)]
pub struct ValidatorConfig {
    /// Also validate request bodies against the request schema.
    pub validate_requests: bool,
    /// What an endpoint or response without a schema accepts.
    pub absent_schema_policy: AbsentSchemaPolicy,
    hook: Arc<dyn DecisionHook>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            validate_requests: true,
            absent_schema_policy: AbsentSchemaPolicy::default(),
            hook: Arc::new(DefaultPolicy),
        }
    }
}

impl ValidatorConfig {
    /// Default policy, request bodies checked.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Unmatched requests pass; schema violations still fail.
    pub fn advisory() -> Self {
        Self::default().with_hook(AdvisoryPolicy)
    }

    /// Replace the decision hook.
    pub fn with_hook(mut self, hook: impl DecisionHook + 'static) -> Self {
        self.hook = Arc::new(hook);
        self
    }

    /// Install a closure as the hook.
    pub fn with_decision<F>(self, decide: F) -> Self
    where
        F: Fn(&DecisionFacts<'_>) -> bool + Send + Sync + 'static,
    {
        self.with_hook(decide)
    }

    /// Install a hook shared with other configs.
    pub fn with_shared_hook(mut self, hook: Arc<dyn DecisionHook>) -> Self {
        self.hook = hook;
        self
    }

    /// Toggle request-body validation.
    pub fn with_validate_requests(mut self, validate_requests: bool) -> Self {
        self.validate_requests = validate_requests;
        self
    }

    /// What a missing schema accepts.
    pub fn with_absent_schema_policy(mut self, policy: AbsentSchemaPolicy) -> Self {
        self.absent_schema_policy = policy;
        self
    }

    /// The configured decision hook.
    pub fn hook(&self) -> &dyn DecisionHook {
        self.hook.as_ref()
    }
}

impl From<&FdocConfig> for ValidatorConfig {
    fn from(config: &FdocConfig) -> Self {
        Self::default().with_absent_schema_policy(config.absent_schema_policy)
    }
}

impl fmt::Debug for ValidatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorConfig")
            .field("validate_requests", &self.validate_requests)
            .field("absent_schema_policy", &self.absent_schema_policy)
            .finish_non_exhaustive()
    }
}
