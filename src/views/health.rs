//! Pod health: pods that are neither running nor completed.

use crate::error::ApiError;
use crate::kubectl::resources::Pod;
use crate::kubectl::{Kubectl, NamespaceScope};

use super::NONE_MARK;

/// A pod whose displayed status is not `Running` or `Completed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemPod {
    pub namespace: String,
    pub name: String,
    pub status: String,
    pub restarts: u32,
    pub node: String,
}

/// Status the way `kubectl get pods` shows it: a terminating marker, then the
/// first container waiting or failed reason, then the phase.
pub fn pod_status(pod: &Pod) -> String {
    if pod.metadata.deletion_timestamp.is_some() {
        return "Terminating".to_string();
    }
    for container in &pod.status.container_statuses {
        if let Some(reason) = container
            .state
            .waiting
            .as_ref()
            .and_then(|w| w.reason.as_deref())
        {
            return reason.to_string();
        }
        if let Some(terminated) = &container.state.terminated {
            match terminated.reason.as_deref() {
                Some("Completed") | None => {}
                Some(reason) => return reason.to_string(),
            }
        }
    }
    match pod.status.phase.as_deref() {
        Some("Succeeded") => "Completed".to_string(),
        Some(phase) if !phase.is_empty() => phase.to_string(),
        _ => "Unknown".to_string(),
    }
}

fn is_healthy(status: &str) -> bool {
    matches!(status, "Running" | "Completed")
}

pub fn problem_pods(pods: &[Pod]) -> Vec<ProblemPod> {
    pods.iter()
        .filter_map(|pod| {
            let status = pod_status(pod);
            if is_healthy(&status) {
                return None;
            }
            Some(ProblemPod {
                namespace: pod.metadata.namespace.clone(),
                name: pod.metadata.name.clone(),
                status,
                restarts: pod.restarts(),
                node: pod
                    .spec
                    .node_name
                    .clone()
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| NONE_MARK.to_string()),
            })
        })
        .collect()
}

pub fn fetch_problem_pods(
    kubectl: &Kubectl,
    scope: NamespaceScope,
) -> Result<Vec<ProblemPod>, ApiError> {
    let pods: Vec<Pod> = kubectl.get_list("pods", scope)?;
    Ok(problem_pods(&pods))
}
