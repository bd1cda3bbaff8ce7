//! # fdoc-model — Endpoints, Services & Meta-Services
//!
//! Turns a filesystem tree of declaration files into a read-only object
//! graph:
//!
//! ```text
//! MetaService ── (version) ── Service ── Endpoint ── ResponseCode ── Schema
//! ```
//!
//! - [`declaration`] is the typed parse step. Text becomes either a
//!   well-formed [`EndpointDeclaration`] or a [`DeclarationError`]; no
//!   model object is built from a declaration that failed.
//! - [`Endpoint`] compiles the schemas of one declaration.
//! - [`Service`] scans a directory for `*.fdoc` files.
//! - [`MetaService`] scans a root for services, optionally per version.
//!
//! ## Crate Policy
//!
//! - Load errors abort the load and name the offending path.
//! - Every directory listing is sorted; load order is reproducible.
//! - The graph is immutable once built and is `Send + Sync`, so one load
//!   can serve concurrent validations.

pub mod declaration;
pub mod endpoint;
mod fs;
pub mod meta_service;
pub mod path;
pub mod service;

pub use declaration::{
    DeclarationError, EndpointDeclaration, MetaManifest, ResponseDeclaration, ServiceManifest,
};
pub use endpoint::Endpoint;
pub use meta_service::MetaService;
pub use path::{request_path, PatternError, Segment, UrlPattern};
pub use service::{EndpointGroup, Service};
