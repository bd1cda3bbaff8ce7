//! # Versions Subcommand
//!
//! Lists the version directories of a versioned tree in natural order and
//! marks the default (latest) one.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fdoc_core::FdocConfig;
use fdoc_model::MetaService;

use crate::resolve_root;

/// Arguments for the `fdoc versions` subcommand.
#[derive(Args, Debug)]
pub struct VersionsArgs {
    /// Root of the versioned tree. Defaults to the configured service path.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

/// Execute the versions subcommand.
///
/// Returns exit code: 0 when at least one version exists, 1 otherwise.
pub fn run_versions(args: &VersionsArgs, config: &FdocConfig) -> Result<u8> {
    let root = resolve_root(args.path.as_deref(), config);
    let meta = MetaService::load(&root, true)
        .with_context(|| format!("failed to load versioned tree at {}", root.display()))?;

    let versions = meta.versions();
    if versions.is_empty() {
        println!("No versions found under {}", root.display());
        return Ok(1);
    }

    let default = meta.default_version();
    for version in versions {
        let services = meta.services(Some(version))?.len();
        let marker = if Some(version) == default { " (default)" } else { "" };
        println!("{version}: {services} service(s){marker}");
    }
    Ok(0)
}
