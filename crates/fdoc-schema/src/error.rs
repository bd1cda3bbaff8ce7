//! Schema errors.

use thiserror::Error;

/// Error raised while building a [`Schema`](crate::Schema).
///
/// These surface at load time: a fragment that cannot compile makes its
/// declaration unusable.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The fragment is not a valid JSON Schema.
    #[error("invalid schema fragment: {reason}")]
    InvalidFragment {
        /// Reason reported by the schema compiler.
        reason: String,
    },

    /// A YAML value has no JSON equivalent.
    #[error("YAML-to-JSON conversion failed: {0}")]
    Conversion(String),
}
