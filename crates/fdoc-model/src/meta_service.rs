//! # MetaService
//!
//! Aggregation of services under one root, optionally partitioned into
//! version subdirectories.
//!
//! ## Design
//!
//! - Without version support every immediate subdirectory of the root is a
//!   service. With it, every immediate subdirectory is a version and its
//!   own subdirectories are that version's services.
//! - Versions are kept in natural order (`v2` before `v10`); the last one
//!   is the default when no version is named.
//! - Slugs are unique per collection. Two directories sanitizing to the
//!   same slug abort the load.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use fdoc_core::{natural_cmp, FdocConfig, FdocError, FdocResult};
use tracing::{debug, info};

use crate::declaration::{parse_meta_manifest, MetaManifest, META_MANIFEST_SUFFIX};
use crate::fs::{ensure_dir, files_with_suffix, read_source, root_slug, subdirectories};
use crate::service::Service;

#[derive(Debug)]
enum Catalog {
    Flat(Vec<Service>),
    Versioned(Vec<(String, Vec<Service>)>),
}

/// A loaded meta-service.
#[derive(Debug)]
pub struct MetaService {
    root: PathBuf,
    name: String,
    description: String,
    catalog: Catalog,
}

impl MetaService {
    /// Load the tree rooted at `root`.
    ///
    /// # Errors
    ///
    /// `DirectoryNotFound` if `root` is not a directory, `DuplicateService`
    /// on a slug collision, and any error from [`Service::load`].
    pub fn load(root: &Path, versions_support: bool) -> FdocResult<Self> {
        ensure_dir(root)?;
        let manifest = load_manifest(root)?;
        let name = match manifest.name {
            Some(name) => name,
            None => root_slug(root)?,
        };

        let catalog = if versions_support {
            let mut versions = Vec::new();
            for dir in subdirectories(root)? {
                let version = dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .ok_or_else(|| FdocError::InvalidSlug { path: dir.clone() })?;
                debug!(version = %version, root = %dir.display(), "scanning version");
                versions.push((version, load_services(&dir)?));
            }
            versions.sort_by(|(a, _), (b, _)| natural_cmp(a, b));
            Catalog::Versioned(versions)
        } else {
            Catalog::Flat(load_services(root)?)
        };

        let meta = Self {
            root: root.to_path_buf(),
            name,
            description: manifest.description,
            catalog,
        };
        info!(
            root = %root.display(),
            versions = meta.versions().len(),
            services = meta.iter_services().count(),
            "loaded meta-service"
        );
        Ok(meta)
    }

    /// Load from `config.service_path` honoring `config.versions_support`.
    pub fn from_config(config: &FdocConfig) -> FdocResult<Self> {
        Self::load(&config.service_path, config.versions_support)
    }

    /// Root directory as given to [`MetaService::load`].
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Display name from the manifest, or the slug of the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Summary from the manifest; empty without one.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the tree was loaded with version support.
    pub fn versions_support(&self) -> bool {
        matches!(self.catalog, Catalog::Versioned(_))
    }

    /// Version identifiers in natural order; empty without version support.
    pub fn versions(&self) -> Vec<&str> {
        match &self.catalog {
            Catalog::Flat(_) => Vec::new(),
            Catalog::Versioned(versions) => versions.iter().map(|(v, _)| v.as_str()).collect(),
        }
    }

    /// The version used when none is named: the latest one.
    pub fn default_version(&self) -> Option<&str> {
        match &self.catalog {
            Catalog::Flat(_) => None,
            Catalog::Versioned(versions) => versions.last().map(|(v, _)| v.as_str()),
        }
    }

    /// Services of `version`, or of the default version when `None`.
    ///
    /// # Errors
    ///
    /// `UnknownVersion` when `version` names no discovered version, which is
    /// always the case for a tree loaded without version support.
    pub fn services(&self, version: Option<&str>) -> FdocResult<&[Service]> {
        match (&self.catalog, version) {
            (Catalog::Flat(services), None) => Ok(services.as_slice()),
            (Catalog::Versioned(versions), None) => {
                Ok(versions.last().map_or(&[][..], |(_, s)| s.as_slice()))
            }
            (Catalog::Versioned(versions), Some(wanted)) => versions
                .iter()
                .find(|(v, _)| v == wanted)
                .map(|(_, s)| s.as_slice())
                .ok_or_else(|| self.unknown_version(wanted)),
            (Catalog::Flat(_), Some(wanted)) => Err(self.unknown_version(wanted)),
        }
    }

    /// Look a service up by slug within `version`.
    pub fn service(&self, slug: &str, version: Option<&str>) -> FdocResult<Option<&Service>> {
        Ok(self.services(version)?.iter().find(|s| s.slug_name() == slug))
    }

    /// Every service with the version it belongs to, versions in order.
    pub fn iter_services(&self) -> impl Iterator<Item = (Option<&str>, &Service)> {
        let (flat, versioned): (&[Service], &[(String, Vec<Service>)]) = match &self.catalog {
            Catalog::Flat(services) => (services.as_slice(), &[]),
            Catalog::Versioned(versions) => (&[], versions.as_slice()),
        };
        flat.iter().map(|s| (None, s)).chain(
            versioned
                .iter()
                .flat_map(|(v, services)| services.iter().map(move |s| (Some(v.as_str()), s))),
        )
    }

    /// True when no service was discovered in any version.
    pub fn is_empty(&self) -> bool {
        self.iter_services().next().is_none()
    }

    fn unknown_version(&self, wanted: &str) -> FdocError {
        FdocError::UnknownVersion {
            version: wanted.to_string(),
            known: self.versions().into_iter().map(str::to_string).collect(),
        }
    }
}

fn load_services(dir: &Path) -> FdocResult<Vec<Service>> {
    let mut slugs = HashSet::new();
    let mut services = Vec::new();
    for sub in subdirectories(dir)? {
        let service = Service::load(&sub)?;
        if !slugs.insert(service.slug_name().to_string()) {
            return Err(FdocError::DuplicateService {
                slug: service.slug_name().to_string(),
                root: dir.to_path_buf(),
            });
        }
        services.push(service);
    }
    Ok(services)
}

fn load_manifest(root: &Path) -> FdocResult<MetaManifest> {
    let manifests = files_with_suffix(root, META_MANIFEST_SUFFIX)?;
    match manifests.as_slice() {
        [] => Ok(MetaManifest::default()),
        [path] => {
            let source = read_source(path)?;
            parse_meta_manifest(&source).map_err(|e| FdocError::malformed(path, e.to_string()))
        }
        [_, second, ..] => Err(FdocError::malformed(
            second,
            format!("more than one {META_MANIFEST_SUFFIX} manifest in meta-service root"),
        )),
    }
}
