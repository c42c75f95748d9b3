//! Configuration loading from files and environment.

use kcsi::config::ConfigLoader;
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes KCSI__* environment mutation.
static CONFIG_ENV_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_config_file_overrides_defaults() {
    let _guard = CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kcsi.toml");
    std::fs::write(
        &path,
        r#"
[kubectl]
binary = "/opt/bin/kubectl-1.31"

[debug]
fast_image = "busybox:1.36"

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(config.kubectl.binary, "/opt/bin/kubectl-1.31");
    assert_eq!(config.debug.fast_image, "busybox:1.36");
    assert_eq!(config.debug.full_image, "nicolaka/netshoot:latest");
    assert_eq!(config.dns.cluster_domain, "cluster.local");
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_environment_overrides_file() {
    let _guard = CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kcsi.toml");
    std::fs::write(&path, "[dns]\ncluster_domain = \"corp.internal\"\n").unwrap();

    std::env::set_var("KCSI__DNS__CLUSTER_DOMAIN", "edge.local");
    let result = ConfigLoader::load_from_file(&path);
    std::env::remove_var("KCSI__DNS__CLUSTER_DOMAIN");

    assert_eq!(result.unwrap().dns.cluster_domain, "edge.local");
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = ConfigLoader::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}

#[test]
fn test_invalid_values_fail_validation() {
    let _guard = CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kcsi.toml");
    std::fs::write(&path, "[kubectl]\nbinary = \"  \"\n").unwrap();

    let err = ConfigLoader::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("kubectl.binary cannot be empty"));
}
