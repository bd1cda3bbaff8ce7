//! # Decision Hook
//!
//! The embedding application decides what passes. The core computes the
//! facts (was the exchange documented, which bodies violated their
//! schemas) and hands them to a [`DecisionHook`].
//!
//! ## Design
//!
//! - The hook is never consulted for an undocumented response code. That
//!   failure is fixed.
//! - A hook that errors or panics does not abort validation; the
//!   [`DefaultPolicy`] decides instead.
//! - Any `Fn(&DecisionFacts) -> bool + Send + Sync` closure is a hook.

use thiserror::Error;

use crate::exchange::Exchange;
use crate::verdict::{BodyKind, Diagnostic};

/// What the hook gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct DecisionFacts<'a> {
    /// The exchange under validation.
    pub exchange: &'a Exchange,
    /// An endpoint answered and the status is declared.
    pub documented: bool,
    /// Schema diagnostics for both bodies, request first.
    pub diagnostics: &'a [Diagnostic],
}

impl DecisionFacts<'_> {
    /// No body violated its schema.
    pub fn schema_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics raised against one body.
    pub fn diagnostics_for(&self, body: BodyKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.body == body)
    }
}

/// A hook could not reach a decision.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("decision hook failed: {reason}")]
pub struct HookError {
    /// Human-readable cause.
    pub reason: String,
}

impl HookError {
    /// Error with the given cause.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Pass/fail strategy for documented exchanges and unmatched requests.
pub trait DecisionHook: Send + Sync {
    /// Return `Ok(true)` to pass the exchange.
    fn decide(&self, facts: &DecisionFacts<'_>) -> Result<bool, HookError>;
}

impl<F> DecisionHook for F
where
    F: Fn(&DecisionFacts<'_>) -> bool + Send + Sync,
{
    fn decide(&self, facts: &DecisionFacts<'_>) -> Result<bool, HookError> {
        Ok(self(facts))
    }
}

/// Success iff documented and schema-valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl DefaultPolicy {
    /// Apply the policy without going through the trait.
    pub fn verdict(facts: &DecisionFacts<'_>) -> bool {
        facts.documented && facts.schema_valid()
    }
}

impl DecisionHook for DefaultPolicy {
    fn decide(&self, facts: &DecisionFacts<'_>) -> Result<bool, HookError> {
        Ok(Self::verdict(facts))
    }
}

/// Documentation completeness is advisory: an unmatched request passes,
/// schema violations still fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvisoryPolicy;

impl DecisionHook for AdvisoryPolicy {
    fn decide(&self, facts: &DecisionFacts<'_>) -> Result<bool, HookError> {
        Ok(facts.schema_valid())
    }
}
