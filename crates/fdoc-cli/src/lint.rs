//! # Lint Subcommand
//!
//! Loads a declaration tree and prints one line per service. Any load
//! error (malformed declaration, duplicate endpoint, duplicate response
//! code) surfaces as an operational error naming the offending file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use fdoc_core::FdocConfig;
use fdoc_model::Service;

use crate::{load_tree, resolve_root, Tree};

/// Arguments for the `fdoc lint` subcommand.
#[derive(Args, Debug)]
pub struct LintArgs {
    /// Root of the declaration tree. Defaults to the configured service path.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Treat immediate subdirectories of the root as versions.
    #[arg(long)]
    pub versions: bool,
}

/// Execute the lint subcommand.
///
/// Returns exit code: 0 when at least one service loaded, 1 when the tree
/// is empty.
pub fn run_lint(args: &LintArgs, config: &FdocConfig) -> Result<u8> {
    let root = resolve_root(args.path.as_deref(), config);
    let versions = args.versions || config.versions_support;

    let lines = match load_tree(&root, versions)? {
        Tree::Single(service) => vec![summary(None, &service)],
        Tree::Meta(meta) => meta
            .iter_services()
            .map(|(version, service)| summary(version, service))
            .collect(),
    };

    if lines.is_empty() {
        println!("No services found under {}", root.display());
        return Ok(1);
    }

    for line in &lines {
        println!("{line}");
    }
    println!("{} service(s) OK", lines.len());
    Ok(0)
}

fn summary(version: Option<&str>, service: &Service) -> String {
    let endpoints = service.endpoints();
    let responses: usize = endpoints.iter().map(|e| e.response_codes().len()).sum();
    let deprecated = endpoints.iter().filter(|e| e.deprecated()).count();
    let label = match version {
        Some(v) => format!("{v}/{}", service.slug_name()),
        None => service.slug_name().to_string(),
    };
    let mut line = format!(
        "  {label}: {} endpoint(s), {responses} response code(s)",
        endpoints.len()
    );
    if deprecated > 0 {
        line.push_str(&format!(", {deprecated} deprecated"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn fixtures() -> PathBuf {
        let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        dir.pop(); // crates
        dir.pop(); // repo root
        dir.join("fixtures")
    }

    fn args(path: &Path, versions: bool) -> LintArgs {
        LintArgs {
            path: Some(path.to_path_buf()),
            versions,
        }
    }

    #[test]
    fn test_lint_flat_tree() {
        let code = run_lint(&args(&fixtures().join("flat"), false), &FdocConfig::default()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_lint_versioned_tree() {
        let code =
            run_lint(&args(&fixtures().join("versioned"), true), &FdocConfig::default()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_lint_single_service_root() {
        let code = run_lint(&args(&fixtures().join("widgets"), false), &FdocConfig::default()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_lint_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(run_lint(&args(dir.path(), false), &FdocConfig::default()).unwrap(), 1);
    }

    #[test]
    fn test_lint_malformed_declaration_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let service = dir.path().join("broken");
        std::fs::create_dir(&service).unwrap();
        std::fs::write(service.join("bad.fdoc"), "title: no url or method\n").unwrap();
        let err = run_lint(&args(dir.path(), false), &FdocConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("bad.fdoc"));
    }

    #[test]
    fn test_summary_line() {
        let service = Service::load(&fixtures().join("widgets")).unwrap();
        assert_eq!(
            summary(Some("v1"), &service),
            "  v1/widgets: 4 endpoint(s), 6 response code(s), 1 deprecated"
        );
    }
}
