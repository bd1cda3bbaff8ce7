//! # fdoc-validator — Exchange Validation
//!
//! Checks recorded HTTP exchanges against a loaded fdoc model.
//!
//! ```text
//! Exchange ─► resolve endpoint ─► check status ─► validate bodies ─► decide
//!                  │                   │
//!                  ▼                   ▼
//!          EndpointNotFound   UndocumentedResponseCode (always fails)
//! ```
//!
//! - [`Validator`] runs the pipeline and returns a [`Verdict`].
//! - [`DecisionHook`] lets the embedding application choose what passes.
//!   [`DefaultPolicy`] passes documented, schema-valid exchanges.
//! - [`Verdict::into_result`] turns a failed verdict into a
//!   [`ValidationFailure`] for callers that want `?`.
//!
//! ## Crate Policy
//!
//! - Validation is a pure function of the model and the exchange.
//! - An undocumented response code is never overridable.
//! - A failing or panicking hook never aborts validation.

pub mod config;
pub mod decision;
pub mod error;
pub mod exchange;
pub mod validator;
pub mod verdict;

pub use config::ValidatorConfig;
pub use decision::{AdvisoryPolicy, DecisionFacts, DecisionHook, DefaultPolicy, HookError};
pub use error::ValidationFailure;
pub use exchange::Exchange;
pub use validator::Validator;
pub use verdict::{BodyKind, Diagnostic, Outcome, Verdict};
