//! # Slugs
//!
//! A service's identity inside a meta-service, and the folder name its
//! rendered output lands in, is derived from the last segment of its root
//! directory. The derivation lives here as one pure function so every
//! consumer agrees on it.

use std::path::Path;

use crate::error::{FdocError, FdocResult};

/// Derive a filesystem-safe slug from the final segment of `path`.
///
/// ASCII alphanumerics, `-`, `_` and `.` are kept; every other character
/// becomes `_`. Fails for paths without a usable final segment (`/`, `..`)
/// and for segments made only of dots.
pub fn slug_of(path: &Path) -> FdocResult<String> {
    let invalid = || FdocError::InvalidSlug {
        path: path.to_path_buf(),
    };

    let segment = path.file_name().ok_or_else(invalid)?.to_string_lossy();

    let slug: String = segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if slug.is_empty() || slug.chars().all(|c| c == '.') {
        return Err(invalid());
    }
    Ok(slug)
}
