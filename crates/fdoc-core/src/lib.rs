//! # fdoc-core — Foundational Types for fdoc
//!
//! Shared primitives for the fdoc document model: the load-time error
//! taxonomy, the explicit configuration object, HTTP verbs, slug
//! derivation and version ordering. Every other crate in the workspace
//! depends on `fdoc-core`; it depends on nothing internal.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fdoc-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - No process-wide mutable state: configuration travels as a value.

pub mod config;
pub mod error;
pub mod method;
pub mod slug;
pub mod version;

// Re-export primary types for ergonomic imports.
pub use config::{AbsentSchemaPolicy, FdocConfig, DEFAULT_SERVICE_PATH};
pub use error::{ConfigError, FdocError, FdocResult};
pub use method::{HttpMethod, UnknownMethod};
pub use slug::slug_of;
pub use version::{natural_cmp, sort_versions};
