//! # Fixture Tree Loading
//!
//! Loads the checked-in trees under `fixtures/` at the repository root and
//! checks the shape of the resulting model.

use std::path::{Path, PathBuf};

use fdoc_core::{FdocConfig, FdocError, HttpMethod};
use fdoc_model::{MetaService, Service};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .map(|root| root.join("fixtures"))
        .expect("crate lives two levels below the repository root")
}

#[test]
fn test_widgets_service_round_trips_fields() {
    let service = Service::load(&fixtures().join("widgets")).unwrap();
    assert_eq!(service.slug_name(), "widgets");
    assert_eq!(service.endpoints().len(), 4);

    let show = service.find_endpoint(HttpMethod::Get, "/widgets/42").unwrap();
    assert_eq!(show.title(), "Fetch a widget");
    assert_eq!(show.description(), "Returns one widget by identifier.");
    let statuses: Vec<u16> = show.response_codes().iter().map(|r| r.status()).collect();
    assert_eq!(statuses, vec![200, 404]);
    assert_eq!(
        show.response_code(200).unwrap().schema().required_properties(),
        vec!["id", "name"]
    );
    assert!(!show.response_code(404).unwrap().schema().is_present());
    assert_eq!(show.examples().len(), 1);

    let legacy = service
        .find_endpoint(HttpMethod::Get, "/widgets/42/legacy")
        .unwrap();
    assert!(legacy.deprecated());

    let create = service.find_endpoint(HttpMethod::Post, "/widgets").unwrap();
    assert!(create.request_schema().is_present());
    assert!(!create.response_code(422).unwrap().successful());
}

#[test]
fn test_widgets_grouping() {
    let service = Service::load(&fixtures().join("widgets")).unwrap();
    let groups = service.endpoints_grouped_by_prefix();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].prefix, "widgets");
    assert_eq!(groups[0].endpoints.len(), 4);
}

#[test]
fn test_flat_meta_service() {
    let meta = MetaService::load(&fixtures().join("flat"), false).unwrap();
    assert_eq!(meta.name(), "Shop Platform");
    assert!(meta.versions().is_empty());

    let services = meta.services(None).unwrap();
    let slugs: Vec<&str> = services.iter().map(|s| s.slug_name()).collect();
    assert_eq!(slugs, vec!["auth", "billing"]);

    let billing = meta.service("billing", None).unwrap().unwrap();
    assert_eq!(billing.name(), "Billing");
    assert_eq!(billing.base_path(), "/billing");
    assert_eq!(billing.discussion(), "Amounts are integer cents.");
    let show = billing
        .find_endpoint(HttpMethod::Get, "/billing/invoices/inv_1")
        .unwrap();
    assert_eq!(billing.endpoint_url(show), "/billing/invoices/:invoice_id");
}

#[test]
fn test_versioned_meta_service() {
    let config = FdocConfig::default()
        .with_service_path(fixtures().join("versioned"))
        .with_versions(true);
    let meta = MetaService::from_config(&config).unwrap();

    assert_eq!(meta.versions(), vec!["v1", "v2"]);
    assert_eq!(meta.default_version(), Some("v2"));

    let v1: Vec<&str> = meta
        .services(Some("v1"))
        .unwrap()
        .iter()
        .map(|s| s.slug_name())
        .collect();
    assert_eq!(v1, vec!["billing"]);

    let latest: Vec<&str> = meta
        .services(None)
        .unwrap()
        .iter()
        .map(|s| s.slug_name())
        .collect();
    assert_eq!(latest, vec!["auth", "billing"]);

    match meta.services(Some("v9")) {
        Err(FdocError::UnknownVersion { known, .. }) => assert_eq!(known, vec!["v1", "v2"]),
        other => panic!("expected UnknownVersion, got {other:?}"),
    }
}

#[test]
fn test_repeated_loads_are_identical() {
    let order = || -> Vec<String> {
        let meta = MetaService::load(&fixtures().join("flat"), false).unwrap();
        meta.iter_services()
            .flat_map(|(_, s)| {
                s.endpoints()
                    .iter()
                    .map(|e| format!("{} {}", e.method(), s.endpoint_url(e)))
                    .collect::<Vec<_>>()
            })
            .collect()
    };
    let first = order();
    assert_eq!(first, order());
    assert_eq!(
        first,
        vec![
            "POST /login",
            "POST /logout",
            "GET /billing/invoices",
            "GET /billing/invoices/:invoice_id",
        ]
    );
}

#[test]
fn test_missing_root() {
    assert!(matches!(
        MetaService::load(&fixtures().join("does-not-exist"), false),
        Err(FdocError::DirectoryNotFound { .. })
    ));
}

#[test]
fn test_current_directory_root_takes_its_real_name() {
    // Integration tests run from the package root.
    let service = Service::load(Path::new(".")).unwrap();
    assert_eq!(service.slug_name(), "fdoc-model");
    assert!(service.endpoints().is_empty());
}
