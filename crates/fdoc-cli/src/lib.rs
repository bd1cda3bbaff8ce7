//! # fdoc-cli — Command-Line Interface
//!
//! Provides the `fdoc` binary.
//!
//! ## Subcommands
//!
//! - `fdoc lint [PATH]`: load a tree and print what it declares.
//! - `fdoc check [PATH] --exchange FILE`: validate one recorded exchange.
//! - `fdoc versions [PATH]`: list discovered versions.
//!
//! `PATH` defaults to `FDOC_SERVICE_PATH`, then `docs/fdoc`.
//!
//! ## Exit Codes
//!
//! - `0`: success.
//! - `1`: the exchange failed validation, or the tree is empty.
//! - `2`: operational error (unreadable tree, malformed declaration, bad
//!   input file).
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers take parsed args and the
//!   resolved configuration and return an exit code.
//! - Handlers delegate to the library crates; no validation logic here.

pub mod check;
pub mod lint;
pub mod versions;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fdoc_core::FdocConfig;
use fdoc_model::{MetaService, Service};

/// A loaded declaration tree: a meta-service, or a lone service when the
/// root holds declarations directly and no sub-services.
#[derive(Debug)]
pub enum Tree {
    Meta(MetaService),
    Single(Service),
}

/// The root to operate on: the explicit path, else the configured one.
pub fn resolve_root(path: Option<&Path>, config: &FdocConfig) -> PathBuf {
    path.map_or_else(|| config.service_path.clone(), Path::to_path_buf)
}

/// Load the tree at `root`.
///
/// A flat root without sub-services is retried as a single service.
pub fn load_tree(root: &Path, versions: bool) -> Result<Tree> {
    let meta = MetaService::load(root, versions)
        .with_context(|| format!("failed to load fdoc tree at {}", root.display()))?;

    if meta.is_empty() && !versions {
        let service = Service::load(root)
            .with_context(|| format!("failed to load service at {}", root.display()))?;
        if !service.endpoints().is_empty() {
            tracing::debug!(root = %root.display(), "root is a single service");
            return Ok(Tree::Single(service));
        }
    }
    Ok(Tree::Meta(meta))
}
