//! Context registry behavior across store handles and the real filesystem.

use kcsi::context::{resolve_namespace, ContextStore, StoreLayout};
use kcsi::error::StoreError;
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

use crate::integration::{with_home_env, write_kubeconfig};

fn store_in(dir: &TempDir) -> ContextStore {
    ContextStore::at(dir.path().join(".kcsi"))
}

#[test]
fn test_add_use_namespace_and_switch_scenario() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let dev_cfg = write_kubeconfig(dir.path(), "dev.yaml", "https://dev:6443");
    let prod_cfg = write_kubeconfig(dir.path(), "prod.yaml", "https://prod:6443");

    store.add_context("dev", &dev_cfg, "lab cluster").unwrap();
    store.add_context("prod", &prod_cfg, "").unwrap();
    store.set_current_context("dev").unwrap();
    store.set_default_namespace("dev", "team-a").unwrap();

    assert_eq!(resolve_namespace(None, &store).as_deref(), Some("team-a"));
    assert_eq!(resolve_namespace(Some("x"), &store).as_deref(), Some("x"));

    // Namespaces are per context
    store.set_current_context("prod").unwrap();
    assert_eq!(store.current_default_namespace().unwrap(), "");
    assert_eq!(resolve_namespace(None, &store), None);
    assert_eq!(store.default_namespace("dev").unwrap(), "team-a");

    // A second handle on the same root sees the same state
    let reopened = store_in(&dir);
    assert_eq!(reopened.current_context_name().unwrap(), "prod");
    let names: Vec<String> = reopened
        .list_contexts()
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["dev", "prod"]);
}

#[test]
fn test_import_copies_content_and_isolates_later_edits() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let source = write_kubeconfig(dir.path(), "external.yaml", "https://one:6443");
    let original = fs::read(&source).unwrap();

    let context = store.import_context("ext", &source, "imported").unwrap();
    let managed = store.layout().context_kubeconfig("ext");
    assert_eq!(context.kubeconfig_path, managed);
    assert_eq!(fs::read(&managed).unwrap(), original);

    fs::write(&source, "changed").unwrap();
    assert_eq!(fs::read(&managed).unwrap(), original);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&managed).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }
}

#[test]
fn test_import_missing_source_creates_nothing() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let err = store
        .import_context("ghost", &dir.path().join("nope.yaml"), "")
        .unwrap_err();
    assert!(matches!(err, StoreError::SourceFileNotFound(_)));
    assert!(!store.layout().context_dir("ghost").exists());
    assert!(store.list_contexts().unwrap().is_empty());
}

#[test]
fn test_import_duplicate_leaves_existing_copy_untouched() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let first = write_kubeconfig(dir.path(), "a.yaml", "https://a:6443");
    let second = write_kubeconfig(dir.path(), "b.yaml", "https://b:6443");

    store.import_context("shared", &first, "").unwrap();
    let managed = store.layout().context_kubeconfig("shared");
    let before = fs::read(&managed).unwrap();

    let err = store.import_context("shared", &second, "").unwrap_err();
    assert!(matches!(err, StoreError::DuplicateName(ref n) if n == "shared"));
    assert_eq!(fs::read(&managed).unwrap(), before);
    assert_eq!(store.list_contexts().unwrap().len(), 1);
}

#[test]
fn test_remove_imported_deletes_managed_dir() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let source = write_kubeconfig(dir.path(), "a.yaml", "https://a:6443");
    store.import_context("gone", &source, "").unwrap();
    store.set_current_context("gone").unwrap();

    let removed = store.remove_context("gone").unwrap();
    assert_eq!(removed.name, "gone");
    assert!(!store.layout().context_dir("gone").exists());
    assert_eq!(store.current_context_name().unwrap(), "");
    assert!(matches!(
        store.current_context(),
        Err(StoreError::NoCurrentContext)
    ));
    // User-owned source is never touched
    assert!(source.exists());
}

#[test]
fn test_remove_added_context_without_managed_dir() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let cfg = write_kubeconfig(dir.path(), "a.yaml", "https://a:6443");
    store.add_context("plain", &cfg, "").unwrap();
    store.remove_context("plain").unwrap();
    assert!(cfg.exists());
    assert!(store.list_contexts().unwrap().is_empty());
}

#[test]
fn test_import_directory_source_leaves_no_managed_dir() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let source_dir = dir.path().join("not-a-file");
    fs::create_dir_all(&source_dir).unwrap();

    let err = store.import_context("x", &source_dir, "").unwrap_err();
    assert!(matches!(err, StoreError::SourceFileNotFound(_)));
    assert!(!store.layout().context_dir("x").exists());
    assert!(store.list_contexts().unwrap().is_empty());
}

#[cfg(unix)]
#[test]
fn test_import_unreadable_source_rolls_back_copy() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let source = write_kubeconfig(dir.path(), "locked.yaml", "https://l:6443");
    fs::set_permissions(&source, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read(&source).is_ok() {
        // Running as root; permissions do not block the read.
        return;
    }

    assert!(store.import_context("locked", &source, "").is_err());
    assert!(!store.layout().context_dir("locked").exists());
    assert!(store.list_contexts().unwrap().is_empty());
}

#[test]
fn test_remove_survives_undeletable_context_dir() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let cfg = write_kubeconfig(dir.path(), "a.yaml", "https://a:6443");
    store.add_context("odd", &cfg, "").unwrap();
    store.set_current_context("odd").unwrap();

    // A regular file where the managed directory would be makes remove_dir_all fail.
    let blocker = store.layout().context_dir("odd");
    fs::write(&blocker, "not a directory").unwrap();

    let removed = store.remove_context("odd").unwrap();
    assert_eq!(removed.name, "odd");
    assert!(store.list_contexts().unwrap().is_empty());
    assert_eq!(store.current_context_name().unwrap(), "");
}

#[test]
fn test_failed_save_keeps_imported_copy() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let source = write_kubeconfig(dir.path(), "a.yaml", "https://a:6443");
    store.import_context("kept", &source, "").unwrap();

    // A directory at the temp path makes the atomic save fail.
    let temp = store.layout().config_file().with_extension("toml.tmp");
    fs::create_dir_all(temp.join("block")).unwrap();

    assert!(store.remove_context("kept").is_err());
    assert!(store.layout().context_kubeconfig("kept").exists());

    fs::remove_dir_all(&temp).unwrap();
    assert_eq!(store.list_contexts().unwrap().len(), 1);
}

#[test]
fn test_home_store_root_and_override() {
    let dir = TempDir::new().unwrap();
    with_home_env(&dir, |home| {
        let layout = StoreLayout::from_home().unwrap();
        assert_eq!(layout.root(), home.join(".kcsi"));
        assert_eq!(layout.config_file(), home.join(".kcsi").join("contexts.toml"));

        let custom = dir.path().join("custom-root");
        std::env::set_var("KCSI_HOME", &custom);
        let layout = StoreLayout::from_home().unwrap();
        assert_eq!(layout.root(), custom.as_path());
        std::env::remove_var("KCSI_HOME");
    });
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_duplicate_add_never_mutates(
        names in prop::collection::hash_set("[a-z][a-z0-9-]{0,12}", 1..6),
        pick in any::<prop::sample::Index>(),
    ) {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let cfg = write_kubeconfig(dir.path(), "k.yaml", "https://k:6443");
        let names: Vec<String> = names.into_iter().collect();
        for name in &names {
            store.add_context(name, &cfg, "").unwrap();
        }

        let file = store.layout().config_file();
        let before = fs::read(&file).unwrap();
        let dup = &names[pick.index(names.len())];
        let result = store.add_context(dup, &cfg, "other");
        prop_assert!(matches!(result, Err(StoreError::DuplicateName(_))));
        prop_assert_eq!(fs::read(&file).unwrap(), before);
        prop_assert_eq!(store.list_contexts().unwrap().len(), names.len());
    }

    #[test]
    fn prop_save_load_round_trip_is_byte_stable(
        names in prop::collection::vec("[a-z][a-z0-9]{0,8}", 0..5),
        namespaces in prop::collection::vec(prop::option::of("[a-z]{1,8}"), 5),
        with_current in any::<bool>(),
    ) {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let cfg = write_kubeconfig(dir.path(), "k.yaml", "https://k:6443");
        let mut added = Vec::new();
        for name in names {
            if store.add_context(&name, &cfg, "").is_ok() {
                added.push(name);
            }
        }
        for (name, ns) in added.iter().zip(namespaces.iter()) {
            if let Some(ns) = ns {
                store.set_default_namespace(name, ns).unwrap();
            }
        }
        if with_current {
            if let Some(first) = added.first() {
                store.set_current_context(first).unwrap();
            }
        }
        store.ensure_initialized().unwrap();

        let file = store.layout().config_file();
        let before = fs::read(&file).unwrap();
        let loaded = store.load().unwrap();
        store.save(&loaded).unwrap();
        prop_assert_eq!(fs::read(&file).unwrap(), before);
        prop_assert_eq!(store.load().unwrap(), loaded);
    }
}
