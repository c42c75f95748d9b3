//! PersistentVolumeClaim views: claim-to-pod usage and unbound claims.

use super::NONE_MARK;
use crate::error::ApiError;
use crate::kubectl::resources::{PersistentVolumeClaim, Pod};
use crate::kubectl::{Kubectl, NamespaceScope};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// One claim and the pods mounting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimUsage {
    pub namespace: String,
    pub name: String,
    pub phase: String,
    pub capacity: String,
    pub storage_class: String,
    pub pods: Vec<String>,
}

/// A claim whose phase is not `Bound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnboundClaim {
    pub namespace: String,
    pub name: String,
    pub phase: String,
    pub capacity: String,
    pub storage_class: String,
    pub age: String,
}

/// `namespace/claimName` -> pod names, in pod order.
pub fn claim_to_pods(pods: &[Pod]) -> HashMap<String, Vec<String>> {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for pod in pods {
        for claim in pod.claim_names() {
            let key = claim_key(&pod.metadata.namespace, claim);
            let users = map.entry(key).or_default();
            if !users.contains(&pod.metadata.name) {
                users.push(pod.metadata.name.clone());
            }
        }
    }
    map
}

fn claim_key(namespace: &str, claim: &str) -> String {
    format!("{}/{}", namespace, claim)
}

pub fn claim_usage(claims: &[PersistentVolumeClaim], pods: &[Pod]) -> Vec<ClaimUsage> {
    let users = claim_to_pods(pods);
    claims
        .iter()
        .map(|pvc| {
            let key = claim_key(&pvc.metadata.namespace, &pvc.metadata.name);
            ClaimUsage {
                namespace: pvc.metadata.namespace.clone(),
                name: pvc.metadata.name.clone(),
                phase: pvc.phase().to_string(),
                capacity: or_none(pvc.capacity()),
                storage_class: or_none(pvc.spec.storage_class_name.as_deref()),
                pods: users.get(&key).cloned().unwrap_or_default(),
            }
        })
        .collect()
}

pub fn unbound_claims(claims: &[PersistentVolumeClaim], now: DateTime<Utc>) -> Vec<UnboundClaim> {
    claims
        .iter()
        .filter(|pvc| !pvc.is_bound())
        .map(|pvc| UnboundClaim {
            namespace: pvc.metadata.namespace.clone(),
            name: pvc.metadata.name.clone(),
            phase: pvc.phase().to_string(),
            capacity: or_none(pvc.capacity()),
            storage_class: or_none(pvc.spec.storage_class_name.as_deref()),
            age: format_age(pvc.metadata.creation_timestamp.as_deref(), now),
        })
        .collect()
}

/// kubectl-style short age (`45s`, `12m`, `3h`, `20d`); `N/A` when unknown.
pub fn format_age(created: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(created) = created.and_then(|ts| DateTime::parse_from_rfc3339(ts).ok()) else {
        return "N/A".to_string();
    };
    let secs = (now - created.with_timezone(&Utc)).num_seconds().max(0);
    match secs {
        s if s < 60 => format!("{}s", s),
        s if s < 3_600 => format!("{}m", s / 60),
        s if s < 86_400 => format!("{}h", s / 3_600),
        s => format!("{}d", s / 86_400),
    }
}

fn or_none(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NONE_MARK.to_string(),
    }
}

pub fn fetch_claim_usage(
    kubectl: &Kubectl,
    scope: NamespaceScope,
) -> Result<Vec<ClaimUsage>, ApiError> {
    let claims: Vec<PersistentVolumeClaim> = kubectl.get_list("pvc", scope.clone())?;
    let pods: Vec<Pod> = kubectl.get_list("pods", scope)?;
    Ok(claim_usage(&claims, &pods))
}

pub fn fetch_unbound_claims(
    kubectl: &Kubectl,
    scope: NamespaceScope,
    now: DateTime<Utc>,
) -> Result<Vec<UnboundClaim>, ApiError> {
    let claims: Vec<PersistentVolumeClaim> = kubectl.get_list("pvc", scope)?;
    Ok(unbound_claims(&claims, now))
}
