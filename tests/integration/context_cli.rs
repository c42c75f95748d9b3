//! End-to-end CLI flows: parse, route, and kubectl delegation through the registry.

use kcsi::error::{ApiError, StoreError};
use kcsi::kubectl::ScriptedRunner;

use crate::integration::harness;

#[test]
fn test_context_lifecycle_through_cli() {
    let h = harness(ScriptedRunner::new(), true);
    let dev = h.kubeconfig("dev.yaml");
    let dev_arg = dev.to_str().unwrap();

    let out = h
        .run(&["context", "add", "dev", dev_arg, "-d", "lab cluster"])
        .unwrap();
    assert!(out.contains("Context 'dev' added successfully"));
    assert!(out.contains("Description: lab cluster"));
    assert!(out.contains("kcsi context use dev"));

    let out = h.run(&["context", "current"]).unwrap();
    assert!(out.starts_with("No context currently active"));

    let out = h.run(&["context", "use", "dev"]).unwrap();
    assert!(out.contains("Switched to context 'dev'"));

    let out = h.run(&["context", "set-namespace", "team-a"]).unwrap();
    assert!(out.contains("Default namespace set to 'team-a' for context 'dev'"));

    let out = h.run(&["context", "get-namespace"]).unwrap();
    assert_eq!(out, "Default namespace for context 'dev': team-a");

    let out = h.run(&["context", "ls"]).unwrap();
    assert!(out.contains("dev"));
    assert!(out.contains("team-a"));
    assert!(out.contains("lab cluster"));

    let out = h.run(&["context", "clear-namespace"]).unwrap();
    assert!(out.contains("Default namespace cleared for context 'dev'"));
    assert!(h
        .run(&["context", "get-namespace"])
        .unwrap()
        .starts_with("No default namespace set for context 'dev'"));

    let out = h.run(&["context", "rm", "dev"]).unwrap();
    assert!(out.contains("Context 'dev' removed successfully"));
    assert!(out.contains("no context is active now"));
    assert!(h
        .run(&["context", "list"])
        .unwrap()
        .starts_with("No contexts configured yet."));
}

#[test]
fn test_add_missing_kubeconfig_fails_without_registering() {
    let h = harness(ScriptedRunner::new(), true);
    let missing = h.dir.path().join("absent.yaml");
    let err = h
        .run(&["context", "add", "ghost", missing.to_str().unwrap()])
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Store(StoreError::SourceFileNotFound(_))
    ));
    assert!(h.store().list_contexts().unwrap().is_empty());
}

#[test]
fn test_duplicate_and_unknown_names_surface_store_errors() {
    let h = harness(ScriptedRunner::new(), true);
    let cfg = h.kubeconfig("a.yaml");
    let cfg_arg = cfg.to_str().unwrap();

    h.run(&["context", "add", "a", cfg_arg]).unwrap();
    assert!(matches!(
        h.run(&["context", "import", "a", cfg_arg]).unwrap_err(),
        ApiError::Store(StoreError::DuplicateName(_))
    ));
    assert!(matches!(
        h.run(&["context", "use", "b"]).unwrap_err(),
        ApiError::Store(StoreError::NotFound(_))
    ));
    assert!(matches!(
        h.run(&["context", "remove", "b"]).unwrap_err(),
        ApiError::Store(StoreError::NotFound(_))
    ));
    assert!(matches!(
        h.run(&["context", "set-namespace", "x"]).unwrap_err(),
        ApiError::Store(StoreError::NoCurrentContext)
    ));
}

#[test]
fn test_imported_context_drives_kubectl() {
    let runner = ScriptedRunner::new();
    let h = harness(runner.clone(), true);
    let source = h.kubeconfig("external.yaml");

    let out = h
        .run(&["context", "import", "ext", source.to_str().unwrap()])
        .unwrap();
    assert!(out.contains("Context 'ext' imported successfully"));
    h.run(&["context", "use", "ext"]).unwrap();
    h.run(&["context", "set-namespace", "shop"]).unwrap();

    h.run(&["get", "pods"]).unwrap();
    h.run(&["logs", "web-1", "-f", "--tail", "20"]).unwrap();

    let managed = h.store().layout().context_kubeconfig("ext");
    let managed = managed.to_str().unwrap();
    let calls = runner.interactive_calls();
    assert_eq!(
        calls[0],
        vec!["--kubeconfig", managed, "get", "pods", "-n", "shop"]
    );
    assert_eq!(
        calls[1],
        vec!["--kubeconfig", managed, "logs", "-n", "shop", "web-1", "-f", "--tail=20"]
    );
}

#[test]
fn test_without_context_kubectl_runs_bare() {
    let runner = ScriptedRunner::new();
    let h = harness(runner.clone(), true);

    h.run(&["get", "deploy"]).unwrap();
    h.run(&["events"]).unwrap();
    h.run(&["get", "nodes", "-n", "ignored"]).unwrap();

    let calls = runner.interactive_calls();
    assert_eq!(calls[0], vec!["get", "deployments"]);
    assert_eq!(
        calls[1],
        vec!["get", "events", "--all-namespaces", "--sort-by=.lastTimestamp"]
    );
    assert_eq!(calls[2], vec!["get", "nodes"]);
}

#[test]
fn test_delete_confirmation_flow() {
    let declined = ScriptedRunner::new();
    let h = harness(declined.clone(), false);
    assert_eq!(
        h.run(&["delete", "pod", "web-1"]).unwrap(),
        "Delete cancelled."
    );
    assert!(declined.interactive_calls().is_empty());

    let accepted = ScriptedRunner::new();
    let h = harness(accepted.clone(), true);
    h.run(&["delete", "deploy", "api", "-n", "prod"]).unwrap();
    assert_eq!(
        accepted.interactive_calls()[0],
        vec!["delete", "deployment", "api", "-n", "prod"]
    );
}

#[test]
fn test_kubectl_failure_propagates() {
    let runner = ScriptedRunner::new().fail(["get", "pvc"], "forbidden");
    let h = harness(runner, true);
    let err = h.run(&["get", "pvc", "pods"]).unwrap_err();
    match err {
        ApiError::KubectlFailed { stderr, .. } => assert!(stderr.contains("forbidden")),
        other => panic!("expected kubectl failure, got {:?}", other),
    }
}

#[test]
fn test_completion_follows_context_namespace() {
    let runner = ScriptedRunner::new()
        .respond(["get", "pods"], "web-1 web-2 worker-1\n")
        .respond(["get", "namespaces"], "default kube-system shop\n");
    let h = harness(runner.clone(), true);
    let cfg = h.kubeconfig("a.yaml");
    h.run(&["context", "add", "a", cfg.to_str().unwrap()]).unwrap();
    h.run(&["context", "use", "a"]).unwrap();
    h.run(&["context", "set-namespace", "shop"]).unwrap();

    assert_eq!(h.run(&["__complete", "pods", "web"]).unwrap(), "web-1\nweb-2");
    assert_eq!(h.run(&["__complete", "namespaces", "k"]).unwrap(), "kube-system");
    assert_eq!(h.run(&["__complete", "contexts"]).unwrap(), "a");

    let calls = runner.calls();
    assert!(calls[0].ends_with(&["-n".to_string(), "shop".to_string()]));
    assert!(!calls[1].contains(&"-n".to_string()));
}
