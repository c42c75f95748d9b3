//! Internal DNS names for services and pods.

use crate::error::ApiError;
use crate::kubectl::resources::{Pod, Service};
use crate::kubectl::{Kubectl, NamespaceScope};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainKind {
    Service,
    Pod,
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainKind::Service => write!(f, "SERVICE"),
            DomainKind::Pod => write!(f, "POD"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalDomain {
    pub kind: DomainKind,
    pub name: String,
    pub namespace: String,
    pub fqdn: String,
    pub ip: String,
    /// Ports for services, phase for pods.
    pub info: String,
}

/// `<service>.<namespace>.svc.<cluster-domain>`
pub fn service_fqdn(name: &str, namespace: &str, cluster_domain: &str) -> String {
    format!("{}.{}.svc.{}", name, namespace, trim_domain(cluster_domain))
}

/// `<a-b-c-d>.<namespace>.pod.<cluster-domain>`
pub fn pod_fqdn(ip: &str, namespace: &str, cluster_domain: &str) -> String {
    format!(
        "{}.{}.pod.{}",
        ip.replace(['.', ':'], "-"),
        namespace,
        trim_domain(cluster_domain)
    )
}

fn trim_domain(domain: &str) -> &str {
    domain.trim_matches('.')
}

/// Services first, then pods that have an IP, each in listing order.
pub fn internal_domains(
    services: &[Service],
    pods: &[Pod],
    cluster_domain: &str,
) -> Vec<InternalDomain> {
    let services = services.iter().map(|svc| InternalDomain {
        kind: DomainKind::Service,
        name: svc.metadata.name.clone(),
        namespace: svc.metadata.namespace.clone(),
        fqdn: service_fqdn(&svc.metadata.name, &svc.metadata.namespace, cluster_domain),
        ip: svc.spec.cluster_ip.clone().unwrap_or_default(),
        info: svc
            .spec
            .ports
            .iter()
            .map(|p| p.port.to_string())
            .collect::<Vec<_>>()
            .join(","),
    });

    let pods = pods.iter().filter_map(|pod| {
        let ip = pod.status.pod_ip.as_deref().filter(|ip| !ip.is_empty())?;
        Some(InternalDomain {
            kind: DomainKind::Pod,
            name: pod.metadata.name.clone(),
            namespace: pod.metadata.namespace.clone(),
            fqdn: pod_fqdn(ip, &pod.metadata.namespace, cluster_domain),
            ip: ip.to_string(),
            info: pod.status.phase.clone().unwrap_or_default(),
        })
    });

    services.chain(pods).collect()
}

pub fn fetch_internal_domains(
    kubectl: &Kubectl,
    scope: NamespaceScope,
    cluster_domain: &str,
) -> Result<Vec<InternalDomain>, ApiError> {
    let services: Vec<Service> = kubectl.get_list("services", scope.clone())?;
    let pods: Vec<Pod> = kubectl.get_list("pods", scope)?;
    Ok(internal_domains(&services, &pods, cluster_domain))
}
