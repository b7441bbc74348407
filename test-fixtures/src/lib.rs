//! Test fixture loader and collaborator doubles for the shopdesk workspace.
//!
//! `catalog/*.json` holds small vendor feeds (inventory, orders, products,
//! pages) that `seed_catalog` pushes through the storage loader. The `mocks`
//! module has a scripted completion provider and a call-recording store.

pub mod mocks;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

use shopdesk_core::traits::IRelationalStore;
use shopdesk_storage::{load_feed, CatalogKind, LoadReport};

pub use mocks::{CompletionCall, RecordingStore, ScriptedCompletion, StoreCall};

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// List all JSON files in a fixture subdirectory.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

/// Records of one catalog feed, e.g. `catalog/orders.json`.
pub fn catalog_records(kind: CatalogKind) -> Vec<serde_json::Value> {
    load_fixture(&format!("catalog/{}.json", kind.as_str()))
}

/// Load every catalog feed into `store`, returning the combined report.
///
/// # Panics
/// Panics if the store rejects a write.
pub fn seed_catalog(store: &dyn IRelationalStore) -> LoadReport {
    let mut total = LoadReport::default();
    for kind in CatalogKind::ALL {
        let records = catalog_records(kind);
        let report = load_feed(store, kind, &records)
            .unwrap_or_else(|e| panic!("Failed to seed {}: {}", kind.as_str(), e));
        total.loaded += report.loaded;
        total.skipped += report.skipped;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "test-fixtures directory not found");
    }

    #[test]
    fn all_catalog_feeds_exist() {
        for kind in CatalogKind::ALL {
            let file = format!("catalog/{}.json", kind.as_str());
            assert!(fixture_exists(&file), "Missing fixture: {}", file);
        }
    }

    #[test]
    fn catalog_feeds_are_json_arrays() {
        let files = list_fixtures("catalog");
        assert_eq!(files.len(), 4);
        for file in &files {
            let content = std::fs::read_to_string(file)
                .unwrap_or_else(|e| panic!("Failed to read {}: {}", file.display(), e));
            let value: serde_json::Value = serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse {}: {}", file.display(), e));
            assert!(value.is_array(), "{} is not an array", file.display());
        }
    }

    #[test]
    fn order_feed_has_no_record_30257() {
        let orders = catalog_records(CatalogKind::Orders);
        assert!(orders
            .iter()
            .all(|o| o["cust_ref"] != "30257" && o["po_no"] != "30257"));
    }
}
