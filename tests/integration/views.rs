//! Claim and DNS views rendered from scripted kubectl JSON.

use kcsi::kubectl::ScriptedRunner;

use crate::integration::harness;

const CLAIMS: &str = r#"{"items": [
    {"metadata": {"name": "pg-data", "namespace": "data", "creationTimestamp": "2024-01-01T00:00:00Z"},
     "spec": {"storageClassName": "fast", "volumeName": "pv-1"},
     "status": {"phase": "Bound", "capacity": {"storage": "10Gi"}}},
    {"metadata": {"name": "scratch", "namespace": "data", "creationTimestamp": "2024-01-01T00:00:00Z"},
     "spec": {"storageClassName": "slow", "resources": {"requests": {"storage": "1Gi"}}},
     "status": {"phase": "Pending"}}
]}"#;

const PODS: &str = r#"{"items": [
    {"metadata": {"name": "pg-0", "namespace": "data"},
     "spec": {"containers": [{"name": "postgres"}],
              "volumes": [{"name": "d", "persistentVolumeClaim": {"claimName": "pg-data"}}]},
     "status": {"phase": "Running", "podIP": "10.1.2.3"}},
    {"metadata": {"name": "init-job", "namespace": "data"},
     "spec": {"containers": [{"name": "job"}]},
     "status": {"phase": "Pending"}}
]}"#;

const SERVICES: &str = r#"{"items": [
    {"metadata": {"name": "pg", "namespace": "data"},
     "spec": {"clusterIP": "10.96.0.15", "ports": [{"port": 5432, "protocol": "TCP"}]}}
]}"#;

#[test]
fn test_pvc_pods_view_joins_claims_and_pods() {
    let runner = ScriptedRunner::new()
        .respond(["get", "pvc"], CLAIMS)
        .respond(["get", "pods"], PODS);
    let h = harness(runner.clone(), true);

    let out = h.run(&["get", "pvc", "pods", "-n", "data"]).unwrap();
    assert!(out.contains("pg-data"));
    assert!(out.contains("pg-0"));
    assert!(out.contains("10Gi"));
    assert!(out.contains("scratch"));
    assert!(out.contains("1Gi"));

    let calls = runner.calls();
    assert_eq!(calls[0], vec!["get", "pvc", "-o", "json", "-n", "data"]);
    assert_eq!(calls[1], vec!["get", "pods", "-o", "json", "-n", "data"]);
}

#[test]
fn test_unbound_view_lists_only_unbound_claims() {
    let runner = ScriptedRunner::new().respond(["get", "pvc"], CLAIMS);
    let h = harness(runner.clone(), true);

    let out = h.run(&["get", "pvc", "unbound"]).unwrap();
    assert!(out.contains("scratch"));
    assert!(!out.contains("pg-data"));
    assert!(out.contains("Found 1 unbound PVC(s)"));
    assert_eq!(
        runner.calls()[0],
        vec!["get", "pvc", "-o", "json", "--all-namespaces"]
    );
}

#[test]
fn test_unbound_view_when_everything_is_bound() {
    let runner = ScriptedRunner::new().respond(["get", "pvc"], r#"{"items": []}"#);
    let h = harness(runner, true);
    assert!(h
        .run(&["get", "pvc", "unbound"])
        .unwrap()
        .contains("All PVCs are bound!"));
}

#[test]
fn test_internal_domains_view() {
    let runner = ScriptedRunner::new()
        .respond(["get", "services"], SERVICES)
        .respond(["get", "pods"], PODS);
    let h = harness(runner, true);

    let out = h.run(&["get", "idom", "-n", "data"]).unwrap();
    assert!(out.contains("pg.data.svc.cluster.local"));
    assert!(out.contains("10-1-2-3.data.pod.cluster.local"));
    assert!(out.contains("5432"));
    // Pods without an IP are skipped
    assert!(!out.contains("init-job"));
}

#[test]
fn test_malformed_json_is_reported() {
    let runner = ScriptedRunner::new().respond(["get", "pvc"], "not json");
    let h = harness(runner, true);
    let err = h.run(&["get", "pvc", "unbound"]).unwrap_err();
    assert!(err.to_string().contains("failed to parse kubectl output for pvc"));
}
