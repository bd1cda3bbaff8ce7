//! # fdoc-schema — Body Schemas & Response Codes
//!
//! The leaves of the fdoc document model.
//!
//! - [`Schema`] wraps one JSON Schema fragment (Draft 2020-12 unless the
//!   fragment names another draft) and validates payloads against it,
//!   returning every [`Violation`] rather than stopping at the first.
//! - [`ResponseCode`] pairs an HTTP status with its description and
//!   schema.
//! - [`yaml_to_json`] converts declaration YAML into the JSON values the
//!   schema compiler works on.
//!
//! ## Crate Policy
//!
//! - Depends only on `fdoc-core` internally.
//! - Malformed fragments fail at compile time with [`SchemaError`];
//!   payload violations are returned as data, never raised.
//! - Schema compilation never performs network IO.

pub mod error;
pub mod response;
pub mod schema;
pub mod violation;
pub mod yaml;

pub use error::SchemaError;
pub use response::{reason_phrase, ResponseCode};
pub use schema::Schema;
pub use violation::{Violation, Violations};
pub use yaml::{key_to_string, yaml_to_json};
