//! # Service
//!
//! A directory of endpoint declarations sharing a base path.
//!
//! ## Design
//!
//! - Declaration files are collected recursively and sorted by path before
//!   parsing, so [`Service::find_endpoint`] resolves first-match in the same
//!   order on every run and platform.
//! - A service root may carry one `*.fdoc.service` manifest naming the
//!   service and its base path. Without one the slug is the name and the
//!   base path is empty, which owns every URL.
//! - Grouping by prefix is a presentation concern and is computed on first
//!   use, then memoized.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use fdoc_core::{FdocError, FdocResult, HttpMethod};
use tracing::{debug, info};

use crate::declaration::{
    parse_service_manifest, ServiceManifest, ENDPOINT_SUFFIX, SERVICE_MANIFEST_SUFFIX,
};
use crate::endpoint::Endpoint;
use crate::fs::{ensure_dir, files_with_suffix, read_source, root_slug, walk_files_with_suffix};
use crate::path::{normalize_base_path, request_path, strip_base_path};

/// Endpoints sharing their first URL segment.
#[derive(Debug, Clone)]
pub struct EndpointGroup<'a> {
    /// First segment after the base path; empty for `/`, `{name}` for a
    /// leading parameter.
    pub prefix: &'a str,
    /// Members in declaration order.
    pub endpoints: Vec<&'a Endpoint>,
}

/// A loaded service.
#[derive(Debug)]
pub struct Service {
    root: PathBuf,
    slug: String,
    name: String,
    base_path: String,
    description: String,
    discussion: String,
    endpoints: Vec<Endpoint>,
    groups: OnceLock<Vec<(String, Vec<usize>)>>,
}

impl Service {
    /// Load every `*.fdoc` declaration under `root`.
    ///
    /// # Errors
    ///
    /// `DirectoryNotFound` if `root` is not a directory, `InvalidSlug` if no
    /// slug can be derived from it, `DuplicateEndpoint` when two
    /// declarations share verb and URL, and any error from
    /// [`Endpoint::load`]. Non-declaration files are ignored.
    pub fn load(root: &Path) -> FdocResult<Self> {
        ensure_dir(root)?;
        let slug = root_slug(root)?;
        let manifest = load_manifest(root)?;

        let mut endpoints = Vec::new();
        let mut seen: HashMap<(HttpMethod, String), PathBuf> = HashMap::new();
        for path in walk_files_with_suffix(root, ENDPOINT_SUFFIX)? {
            let endpoint = Endpoint::load(&path)?;
            if seen.insert(endpoint.identity(), path.clone()).is_some() {
                return Err(FdocError::DuplicateEndpoint {
                    service: slug,
                    method: endpoint.method().to_string(),
                    url: endpoint.url().to_string(),
                    path,
                });
            }
            endpoints.push(endpoint);
        }

        let name = manifest.name.unwrap_or_else(|| slug.clone());
        let base_path = normalize_base_path(&manifest.base_path);

        info!(
            service = %slug,
            root = %root.display(),
            base_path = %base_path,
            endpoints = endpoints.len(),
            "loaded service"
        );

        Ok(Self {
            root: root.to_path_buf(),
            slug,
            name,
            base_path,
            description: manifest.description,
            discussion: manifest.discussion,
            endpoints,
            groups: OnceLock::new(),
        })
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem-safe identity derived from the root directory name.
    pub fn slug_name(&self) -> &str {
        &self.slug
    }

    /// Display name from the manifest, or the slug.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized base path (`""` or `/segment...`).
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Short summary from the manifest.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Longer free-form notes from the manifest.
    pub fn discussion(&self) -> &str {
        &self.discussion
    }

    /// All endpoints in load order.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Endpoints grouped by the first segment of their URL, groups ordered
    /// by first appearance.
    pub fn endpoints_grouped_by_prefix(&self) -> Vec<EndpointGroup<'_>> {
        let groups = self.groups.get_or_init(|| {
            let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
            for (idx, endpoint) in self.endpoints.iter().enumerate() {
                let prefix = endpoint.url().prefix();
                match groups.iter_mut().find(|(p, _)| p.as_str() == prefix.as_ref()) {
                    Some((_, members)) => members.push(idx),
                    None => groups.push((prefix.into_owned(), vec![idx])),
                }
            }
            groups
        });

        groups
            .iter()
            .map(|(prefix, members)| EndpointGroup {
                prefix: prefix.as_str(),
                endpoints: members.iter().map(|&i| &self.endpoints[i]).collect(),
            })
            .collect()
    }

    /// Whether `url` falls under this service's base path.
    pub fn owns(&self, url: &str) -> bool {
        strip_base_path(&self.base_path, request_path(url)).is_some()
    }

    /// First endpoint answering `method` on `url`. `url` may be a full URL
    /// with origin, query and fragment; it must fall under the base path.
    pub fn find_endpoint(&self, method: HttpMethod, url: &str) -> Option<&Endpoint> {
        let path = request_path(url);
        let Some(relative) = strip_base_path(&self.base_path, path) else {
            debug!(service = %self.slug, url, "outside base path");
            return None;
        };
        self.endpoints.iter().find(|e| e.matches(method, relative))
    }

    /// Full URL pattern of `endpoint`: base path plus endpoint URL.
    pub fn endpoint_url(&self, endpoint: &Endpoint) -> String {
        match (self.base_path.as_str(), endpoint.url().as_str()) {
            ("", url) => url.to_string(),
            (base, "/") => base.to_string(),
            (base, url) => format!("{base}{url}"),
        }
    }
}

fn load_manifest(root: &Path) -> FdocResult<ServiceManifest> {
    let manifests = files_with_suffix(root, SERVICE_MANIFEST_SUFFIX)?;
    match manifests.as_slice() {
        [] => Ok(ServiceManifest::default()),
        [path] => {
            let source = read_source(path)?;
            parse_service_manifest(&source).map_err(|e| FdocError::malformed(path, e.to_string()))
        }
        [_, second, ..] => Err(FdocError::malformed(
            second,
            format!("more than one {SERVICE_MANIFEST_SUFFIX} manifest in service root"),
        )),
    }
}
