//! Tests for the view registry.
mod common;
use common::*;
use menuflow::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn test_resolve_known_view() {
    let registry = create_registry();
    let loader = registry.resolve("sys/user").expect("sys/user should be registered");
    assert_eq!(loader.key(), "sys/user");

    let module = loader.load();
    assert_eq!(module.id, "sys/user");
    assert_eq!(module.source, "../views/sys/user.vue");
}

#[test]
fn test_resolve_unknown_view_is_none() {
    let registry = create_registry();
    assert!(registry.resolve("sys/missing").is_none());
    assert!(registry.resolve("").is_none());
    // Lookup is exact, not prefix or suffix based.
    assert!(registry.resolve("sys").is_none());
    assert!(registry.resolve("sys/user.vue").is_none());
}

#[test]
fn test_last_registration_wins() {
    let registry = ViewRegistry::builder()
        .register("../views/sys/user.vue", || ViewModule {
            id: "sys/user".to_string(),
            source: "first".to_string(),
        })
        .register("/src/views/sys/user.tsx", || ViewModule {
            id: "sys/user".to_string(),
            source: "second".to_string(),
        })
        .build();

    assert_eq!(registry.len(), 1);
    let module = registry.resolve("sys/user").unwrap().load();
    assert_eq!(module.source, "second");
}

#[test]
fn test_loader_is_lazy() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let registry = ViewRegistry::builder()
        .register("../views/report.vue", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            ViewModule {
                id: "report".to_string(),
                source: "report.vue".to_string(),
            }
        })
        .build();

    let loader = registry.resolve("report").unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    loader.load();
    loader.clone().load();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_empty_paths_are_skipped() {
    let registry = ViewRegistry::from_manifest(["", "../views/", "../views/ok.vue"]);
    assert_eq!(registry.keys(), vec!["ok"]);
}

#[test]
fn test_manifest_file_errors() {
    let err = ViewRegistry::from_manifest_file("does/not/exist.json").unwrap_err();
    assert!(matches!(err, ViewError::ManifestRead { .. }));
    assert!(err.to_string().contains("does/not/exist.json"));
}
