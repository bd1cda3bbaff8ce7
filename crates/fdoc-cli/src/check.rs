//! # Check Subcommand
//!
//! Validates one recorded exchange (a JSON document) against a declaration
//! tree and prints the verdict.
//!
//! ```json
//! {
//!   "method": "GET",
//!   "url": "/widgets/42",
//!   "status_code": 200,
//!   "response_body": { "id": 42, "name": "sprocket" }
//! }
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use fdoc_core::FdocConfig;
use fdoc_validator::{Exchange, Validator, ValidatorConfig, Verdict};

use crate::{load_tree, resolve_root, Tree};

/// Arguments for the `fdoc check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Root of the declaration tree. Defaults to the configured service path.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Recorded exchange as JSON. Use `-` to read standard input.
    #[arg(long, value_name = "FILE")]
    pub exchange: PathBuf,

    /// Version to validate against. Defaults to the latest.
    #[arg(long = "version", value_name = "VERSION")]
    pub api_version: Option<String>,

    /// Treat immediate subdirectories of the root as versions.
    #[arg(long)]
    pub versions: bool,

    /// Let requests to undocumented endpoints pass.
    #[arg(long)]
    pub advisory: bool,

    /// Do not validate the request body.
    #[arg(long)]
    pub no_requests: bool,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 when the exchange passes, 1 when it fails.
pub fn run_check(args: &CheckArgs, config: &FdocConfig) -> Result<u8> {
    let exchange = read_exchange(&args.exchange)?;
    let root = resolve_root(args.path.as_deref(), config);
    let versions = args.versions || args.api_version.is_some() || config.versions_support;
    let tree = load_tree(&root, versions)?;

    let verdict = check_exchange(&tree, &exchange, args, validator_config(args, config))?;
    println!("{verdict}");

    match verdict.into_result() {
        Ok(_) => Ok(0),
        Err(failure) => {
            tracing::info!(%failure, "exchange failed validation");
            Ok(1)
        }
    }
}

fn validator_config(args: &CheckArgs, config: &FdocConfig) -> ValidatorConfig {
    let base = if args.advisory {
        ValidatorConfig::advisory()
    } else {
        ValidatorConfig::strict()
    };
    base.with_absent_schema_policy(config.absent_schema_policy)
        .with_validate_requests(!args.no_requests)
}

fn check_exchange(
    tree: &Tree,
    exchange: &Exchange,
    args: &CheckArgs,
    config: ValidatorConfig,
) -> Result<Verdict> {
    let validator = match tree {
        Tree::Single(service) => {
            if let Some(version) = &args.api_version {
                anyhow::bail!("--version {version} given but the tree is a single unversioned service");
            }
            Validator::for_service(service, config)
        }
        Tree::Meta(meta) => Validator::for_meta_service(meta, args.api_version.as_deref(), config)?,
    };
    Ok(validator.validate(exchange))
}

fn read_exchange(path: &Path) -> Result<Exchange> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read exchange from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read exchange {}", path.display()))?
    };
    serde_json::from_str(&raw).with_context(|| format!("invalid exchange {}", path.display()))
}
