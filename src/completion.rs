//! Shell completion candidates
//!
//! Resource names come from kubectl through the active context; context names
//! come from the registry without touching the cluster. [`shell`] exposes the
//! same candidates to clap's dynamic completion engine.

pub mod shell;

use crate::context::ContextStore;
use crate::error::ApiError;
use crate::kubectl::{Kubectl, NamespaceScope};
use clap::ValueEnum;

/// Kinds of names a shell can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompletionKind {
    Namespaces,
    Pods,
    Containers,
    Services,
    Deployments,
    Configmaps,
    Secrets,
    Statefulsets,
    Daemonsets,
    Nodes,
    Contexts,
}

impl CompletionKind {
    /// kubectl resource name, `None` for kinds not listed through `kubectl get`.
    pub fn resource(self) -> Option<&'static str> {
        match self {
            CompletionKind::Namespaces => Some("namespaces"),
            CompletionKind::Pods => Some("pods"),
            CompletionKind::Services => Some("services"),
            CompletionKind::Deployments => Some("deployments"),
            CompletionKind::Configmaps => Some("configmaps"),
            CompletionKind::Secrets => Some("secrets"),
            CompletionKind::Statefulsets => Some("statefulsets"),
            CompletionKind::Daemonsets => Some("daemonsets"),
            CompletionKind::Nodes => Some("nodes"),
            CompletionKind::Containers | CompletionKind::Contexts => None,
        }
    }

    pub fn is_cluster_scoped(self) -> bool {
        matches!(self, CompletionKind::Namespaces | CompletionKind::Nodes)
    }
}

/// What the shell is completing.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    pub prefix: String,
    /// Already resolved (explicit `-n` or the context default).
    pub namespace: Option<String>,
    /// Narrows containers to one pod; without it every pod in scope counts.
    pub pod: Option<String>,
}

pub struct CompletionSource<'a> {
    kubectl: &'a Kubectl,
    store: &'a ContextStore,
}

impl<'a> CompletionSource<'a> {
    pub fn new(kubectl: &'a Kubectl, store: &'a ContextStore) -> Self {
        Self { kubectl, store }
    }

    pub fn candidates(
        &self,
        kind: CompletionKind,
        request: &CompletionRequest,
    ) -> Result<Vec<String>, ApiError> {
        let names = match kind {
            CompletionKind::Contexts => self
                .store
                .list_contexts()?
                .into_iter()
                .map(|c| c.name)
                .collect(),
            CompletionKind::Containers => match request.pod.as_deref() {
                Some(pod) => self.kubectl.container_names(
                    pod,
                    NamespaceScope::or_default(request.namespace.clone()),
                )?,
                None => self
                    .kubectl
                    .all_container_names(NamespaceScope::or_all(request.namespace.clone()))?,
            },
            _ => match kind.resource() {
                Some(resource) => {
                    let scope = if kind.is_cluster_scoped() {
                        NamespaceScope::Unset
                    } else {
                        NamespaceScope::or_all(request.namespace.clone())
                    };
                    self.kubectl.names(resource, scope)?
                }
                None => Vec::new(),
            },
        };
        Ok(filter_prefix(names, &request.prefix))
    }
}

fn filter_prefix(names: Vec<String>, prefix: &str) -> Vec<String> {
    if prefix.is_empty() {
        return names;
    }
    names.into_iter().filter(|n| n.starts_with(prefix)).collect()
}
