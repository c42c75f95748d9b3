//! Health checks, secrets, rollouts and in-pod commands driven by the active
//! context's default namespace.

use kcsi::error::ApiError;
use kcsi::kubectl::ScriptedRunner;

use crate::integration::{harness, Harness};

const PODS: &str = r#"{"items": [
    {"metadata": {"name": "web-1", "namespace": "shop"},
     "status": {"phase": "Running", "containerStatuses": [{"name": "web", "ready": true, "state": {"running": {}}}]}},
    {"metadata": {"name": "api-0", "namespace": "shop"},
     "spec": {"nodeName": "worker-2"},
     "status": {"phase": "Running", "containerStatuses": [
        {"name": "api", "restartCount": 4, "state": {"waiting": {"reason": "ImagePullBackOff"}}}]}}
]}"#;

const SECRET: &str = r#"{
    "metadata": {"name": "db-creds", "namespace": "shop"},
    "type": "Opaque",
    "data": {"username": "YWRtaW4=", "password": "czNjcjN0"}
}"#;

/// Harness with context `prod` active and `shop` as its default namespace.
fn shop_context(runner: ScriptedRunner) -> Harness {
    let h = harness(runner, true);
    let cfg = h.kubeconfig("prod.yaml");
    h.run(&["context", "add", "prod", cfg.to_str().unwrap()]).unwrap();
    h.run(&["context", "use", "prod"]).unwrap();
    h.run(&["context", "set-namespace", "shop"]).unwrap();
    h
}

fn without_kubeconfig(call: &[String]) -> &[String] {
    if call.first().map(String::as_str) == Some("--kubeconfig") {
        &call[2..]
    } else {
        call
    }
}

#[test]
fn test_check_errors_lists_unhealthy_pods() {
    let runner = ScriptedRunner::new().respond(["get", "pods"], PODS);
    let h = shop_context(runner.clone());

    let out = h.run(&["check", "err"]).unwrap();
    assert!(out.contains("api-0"));
    assert!(out.contains("ImagePullBackOff"));
    assert!(out.contains("worker-2"));
    assert!(!out.contains("web-1"));
    assert_eq!(
        without_kubeconfig(&runner.calls()[0]),
        &["get", "pods", "-o", "json", "-n", "shop"]
    );
}

#[test]
fn test_check_errors_all_healthy() {
    let runner = ScriptedRunner::new().respond(["get", "pods"], r#"{"items": []}"#);
    let h = harness(runner.clone(), true);
    let out = h.run(&["check", "errors"]).unwrap();
    assert!(out.contains("No problematic pods found!"));
    assert!(runner.calls()[0].contains(&"--all-namespaces".to_string()));
}

#[test]
fn test_secrets_decoded_and_show() {
    let runner = ScriptedRunner::new().respond(["get", "secret", "db-creds"], SECRET);
    let h = shop_context(runner.clone());

    let table = h.run(&["get", "secrets", "decoded", "db-creds"]).unwrap();
    assert!(table.contains("Secret: db-creds (namespace: shop)"));
    assert!(table.contains("admin"));
    assert!(table.contains("s3cr3t"));

    let value = h
        .run(&["get", "secret", "show", "db-creds", "--key", "username"])
        .unwrap();
    assert_eq!(value, "admin");

    let err = h
        .run(&["get", "secret", "show", "db-creds", "-k", "token"])
        .unwrap_err();
    assert!(matches!(err, ApiError::SecretData { .. }));

    for call in runner.calls() {
        assert_eq!(
            without_kubeconfig(&call),
            &["get", "secret", "db-creds", "-n", "shop", "-o", "json"]
        );
    }
}

#[test]
fn test_plain_secret_listing_still_passes_through() {
    let runner = ScriptedRunner::new();
    let h = harness(runner.clone(), true);
    h.run(&["get", "secrets", "-n", "shop"]).unwrap();
    assert_eq!(
        runner.interactive_calls()[0],
        vec!["get", "secrets", "-n", "shop"]
    );
}

#[test]
fn test_rollout_and_top_commands() {
    let runner = ScriptedRunner::new();
    let h = shop_context(runner.clone());

    h.run(&["rollout", "restart", "deploy", "api"]).unwrap();
    h.run(&["rollout", "history", "sts", "db", "-n", "data"]).unwrap();
    h.run(&["top", "pods"]).unwrap();
    h.run(&["top", "nodes", "worker-2"]).unwrap();

    let calls = runner.interactive_calls();
    assert_eq!(
        without_kubeconfig(&calls[0]),
        &["rollout", "restart", "deployment", "api", "-n", "shop"]
    );
    assert_eq!(
        without_kubeconfig(&calls[1]),
        &["rollout", "history", "statefulset", "db", "-n", "data"]
    );
    assert_eq!(without_kubeconfig(&calls[2]), &["top", "pods", "-n", "shop"]);
    assert_eq!(without_kubeconfig(&calls[3]), &["top", "nodes", "worker-2"]);
}

#[test]
fn test_in_pod_commands_use_context_namespace() {
    let runner = ScriptedRunner::new();
    let h = shop_context(runner.clone());

    h.run(&["exec", "web-1", "--", "cat", "/etc/hosts"]).unwrap();
    h.run(&["dig", "web-1", "api.shop.svc.cluster.local", "+short"])
        .unwrap();

    let calls = runner.interactive_calls();
    assert_eq!(
        without_kubeconfig(&calls[0]),
        &["exec", "-n", "shop", "web-1", "--", "cat", "/etc/hosts"]
    );
    assert_eq!(
        without_kubeconfig(&calls[1]),
        &["exec", "-it", "-n", "shop", "web-1", "--", "sh", "-c", "dig api.shop.svc.cluster.local +short"]
    );
}

#[test]
fn test_attach_reports_missing_shell() {
    let runner = ScriptedRunner::new().fail(["exec"], "executable file not found");
    let h = harness(runner.clone(), true);
    let err = h.run(&["attach", "web-1"]).unwrap_err();
    assert!(matches!(err, ApiError::NoShell { namespace: None, .. }));
    assert!(kcsi::cli::map_error(&err).contains("-n"));
    assert_eq!(runner.interactive_calls().len(), 3);
}

#[test]
fn test_port_forward_refuses_busy_port() {
    let listener = std::net::TcpListener::bind(("127.0.0.1", 0)).unwrap();
    let port = listener.local_addr().unwrap().port();
    let runner = ScriptedRunner::new();
    let h = harness(runner.clone(), true);

    let mapping = format!("{}:80", port);
    let err = h.run(&["port-forward", "web-1", mapping.as_str()]).unwrap_err();
    assert!(matches!(err, ApiError::PortInUse(p) if p == port));
    assert!(runner.interactive_calls().is_empty());
    drop(listener);
}
