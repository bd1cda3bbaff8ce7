//! Model configuration.
//!
//! One explicit value passed into model construction and validation in
//! place of process-wide settings. Defaults match the conventional layout
//! (`docs/fdoc`, no versioning). Override via environment variables or
//! the `with_*` builders.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default location of the fdoc tree, relative to the working directory.
pub const DEFAULT_SERVICE_PATH: &str = "docs/fdoc";

/// What an absent schema accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AbsentSchemaPolicy {
    /// No schema declared: any body, present or not, is accepted.
    #[default]
    AcceptAny,
    /// No schema declared: only a missing or `null` body is accepted.
    RequireEmpty,
}

impl FromStr for AbsentSchemaPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "accept-any" => Ok(Self::AcceptAny),
            "require-empty" => Ok(Self::RequireEmpty),
            other => Err(format!(
                "expected 'accept-any' or 'require-empty', got {other:?}"
            )),
        }
    }
}

/// Configuration for loading and validating an fdoc tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FdocConfig {
    /// Root of the fdoc tree.
    pub service_path: PathBuf,
    /// Whether immediate subdirectories of the root are versions.
    pub versions_support: bool,
    /// Handling of bodies checked against an undeclared schema.
    pub absent_schema_policy: AbsentSchemaPolicy,
}

impl Default for FdocConfig {
    fn default() -> Self {
        Self {
            service_path: PathBuf::from(DEFAULT_SERVICE_PATH),
            versions_support: false,
            absent_schema_policy: AbsentSchemaPolicy::default(),
        }
    }
}

impl FdocConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `FDOC_SERVICE_PATH` (default: `docs/fdoc`)
    /// - `FDOC_VERSIONS`: `1`/`true`/`yes`/`on` or `0`/`false`/`no`/`off` (default: off)
    /// - `FDOC_ABSENT_SCHEMA`: `accept-any` or `require-empty` (default: `accept-any`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("FDOC_SERVICE_PATH").filter(|p| !p.trim().is_empty()) {
            config.service_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup("FDOC_VERSIONS") {
            config.versions_support = parse_flag(&raw).ok_or_else(|| ConfigError::InvalidValue {
                var: "FDOC_VERSIONS".to_string(),
                value: raw.clone(),
                reason: "expected 1/true/yes/on or 0/false/no/off".to_string(),
            })?;
        }

        if let Some(raw) = lookup("FDOC_ABSENT_SCHEMA") {
            config.absent_schema_policy =
                raw.parse().map_err(|reason| ConfigError::InvalidValue {
                    var: "FDOC_ABSENT_SCHEMA".to_string(),
                    value: raw.clone(),
                    reason,
                })?;
        }

        Ok(config)
    }

    /// Set the root of the fdoc tree.
    pub fn with_service_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.service_path = path.into();
        self
    }

    /// Enable or disable version subdirectories.
    pub fn with_versions(mut self, versions_support: bool) -> Self {
        self.versions_support = versions_support;
        self
    }

    /// Set the absent-schema policy.
    pub fn with_absent_schema_policy(mut self, policy: AbsentSchemaPolicy) -> Self {
        self.absent_schema_policy = policy;
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
