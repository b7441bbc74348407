//! The global runtime slot. Kept in its own test binary since it is process-wide.

use std::sync::Arc;

use shopdesk_core::errors::ShopdeskError;
use shopdesk_runtime::{get, install, is_initialized, RuntimeOptions, ShopdeskRuntime};
use test_fixtures::ScriptedCompletion;

#[test]
fn runtime_installs_once() {
    assert!(!is_initialized());
    assert!(matches!(get(), Err(ShopdeskError::ConfigError(_))));

    let first = ShopdeskRuntime::with_completion(
        RuntimeOptions::default(),
        Arc::new(ScriptedCompletion::repeating("hi (misc)")),
    )
    .unwrap();
    let installed = install(first).unwrap();
    assert!(is_initialized());
    assert!(Arc::ptr_eq(&installed, &get().unwrap()));

    let second = ShopdeskRuntime::catalog_only(RuntimeOptions::default()).unwrap();
    assert!(matches!(install(second), Err(ShopdeskError::ConfigError(_))));
}
