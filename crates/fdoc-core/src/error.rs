//! # Error Types — Load-Time Structural Errors
//!
//! Defines the errors raised while turning a filesystem tree of fdoc
//! declarations into the in-memory model. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Every variant names the offending path so a broken declaration can
//!   be located without re-running the load.
//! - A load error aborts construction of the affected Service or
//!   MetaService. Nothing is skipped silently.
//! - Validation-time failures (undocumented response codes, schema
//!   violations) live in `fdoc-validator`, not here.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for model construction.
pub type FdocResult<T> = Result<T, FdocError>;

/// Top-level error type for loading fdoc trees.
#[derive(Error, Debug)]
pub enum FdocError {
    /// The service or meta-service root does not exist or is not a directory.
    #[error("fdoc directory not found: {}", path.display())]
    DirectoryNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// A declaration file is not well-formed or misses a required field.
    #[error("malformed declaration {}: {reason}", path.display())]
    MalformedDeclaration {
        /// Path of the declaration file.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },

    /// Two endpoints in one service share the same verb and URL.
    #[error("duplicate endpoint {method} {url} in service '{service}' ({})", path.display())]
    DuplicateEndpoint {
        /// Slug of the service holding both declarations.
        service: String,
        /// HTTP verb.
        method: String,
        /// URL pattern.
        url: String,
        /// Path of the second declaration.
        path: PathBuf,
    },

    /// One endpoint declares the same status code twice.
    #[error("duplicate response code {status} in {}", path.display())]
    DuplicateResponseCode {
        /// Path of the declaration file.
        path: PathBuf,
        /// The repeated status code.
        status: u16,
    },

    /// Two services in one meta-service derive the same slug.
    #[error("duplicate service slug '{slug}' under {}", root.display())]
    DuplicateService {
        /// The colliding slug.
        slug: String,
        /// Meta-service (or version) root.
        root: PathBuf,
    },

    /// An explicit version was requested that was never discovered.
    #[error("unknown version '{version}' (known: {})", known.join(", "))]
    UnknownVersion {
        /// The requested version identifier.
        version: String,
        /// Version identifiers that do exist.
        known: Vec<String>,
    },

    /// No slug can be derived from a directory path.
    #[error("cannot derive a slug from {}", path.display())]
    InvalidSlug {
        /// The offending path.
        path: PathBuf,
    },

    /// IO error while scanning or reading a declaration.
    #[error("io error at {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl FdocError {
    /// Build an IO error bound to `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a malformed-declaration error bound to `path`.
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedDeclaration {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Error while reading configuration from the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A variable holds a value that cannot be interpreted.
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        /// Environment variable name.
        var: String,
        /// The raw value.
        value: String,
        /// Accepted values.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_not_found_names_path() {
        let err = FdocError::DirectoryNotFound {
            path: PathBuf::from("docs/fdoc/missing"),
        };
        assert!(err.to_string().contains("docs/fdoc/missing"));
    }

    #[test]
    fn test_malformed_declaration_display() {
        let err = FdocError::malformed("a/list-GET.fdoc", "missing field `url`");
        let msg = err.to_string();
        assert!(msg.contains("a/list-GET.fdoc"));
        assert!(msg.contains("missing field `url`"));
    }

    #[test]
    fn test_unknown_version_lists_known() {
        let err = FdocError::UnknownVersion {
            version: "v9".to_string(),
            known: vec!["v1".to_string(), "v2".to_string()],
        };
        assert_eq!(err.to_string(), "unknown version 'v9' (known: v1, v2)");
    }

    #[test]
    fn test_duplicate_endpoint_display() {
        let err = FdocError::DuplicateEndpoint {
            service: "billing".to_string(),
            method: "GET".to_string(),
            url: "/invoices".to_string(),
            path: PathBuf::from("billing/copy.fdoc"),
        };
        let msg = err.to_string();
        assert!(msg.contains("GET /invoices"));
        assert!(msg.contains("'billing'"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = FdocError::io(
            "x.fdoc",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
