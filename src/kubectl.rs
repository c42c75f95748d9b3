//! kubectl delegation
//!
//! Every resource command ends here: an [`Invocation`] is built, the active
//! context's kubeconfig is attached, and a [`KubectlRunner`] executes it.

mod invocation;
pub mod resources;
mod runner;
mod scripted;

pub use invocation::{Invocation, NamespaceScope};
pub use runner::{KubectlRunner, ProcessRunner};
pub use scripted::ScriptedRunner;

use crate::context::ContextStore;
use crate::error::{ApiError, StoreError};
use resources::{ClientVersion, ResourceList};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const JSONPATH_NAMES: &str = "jsonpath={.items[*].metadata.name}";
const JSONPATH_CONTAINER_NAMES: &str = "jsonpath={.spec.containers[*].name}";
const JSONPATH_ALL_CONTAINER_NAMES: &str = "jsonpath={.items[*].spec.containers[*].name}";

/// kubectl bound to an optional kubeconfig.
pub struct Kubectl {
    runner: Box<dyn KubectlRunner>,
    kubeconfig: Option<PathBuf>,
}

impl Kubectl {
    pub fn new(runner: Box<dyn KubectlRunner>) -> Self {
        Self {
            runner,
            kubeconfig: None,
        }
    }

    /// Bound to the registry's current context; kubectl's own defaults apply
    /// when none is active or the registry cannot be read.
    pub fn for_current_context(runner: Box<dyn KubectlRunner>, store: &ContextStore) -> Self {
        let kubectl = Self::new(runner);
        match store.current_context() {
            Ok(context) => {
                debug!(context = %context.name, "Using kubeconfig of current context");
                kubectl.with_kubeconfig(context.kubeconfig_path)
            }
            Err(StoreError::NoCurrentContext) => kubectl,
            Err(e) => {
                warn!(error = %e, "Could not read current context, using kubectl defaults");
                kubectl
            }
        }
    }

    /// Pass `--kubeconfig <path>` on every call.
    pub fn with_kubeconfig(mut self, path: impl Into<PathBuf>) -> Self {
        self.kubeconfig = Some(path.into());
        self
    }

    pub fn kubeconfig(&self) -> Option<&Path> {
        self.kubeconfig.as_deref()
    }

    fn bind(&self, invocation: Invocation) -> Invocation {
        match &self.kubeconfig {
            Some(path) => invocation.kubeconfig(path.clone()),
            None => invocation,
        }
    }

    /// Run and return stdout.
    pub fn capture(&self, invocation: Invocation) -> Result<String, ApiError> {
        let invocation = self.bind(invocation);
        debug!(args = ?invocation.to_args(), "kubectl capture");
        self.runner.capture(&invocation)
    }

    /// Run attached to the terminal.
    pub fn interactive(&self, invocation: Invocation) -> Result<(), ApiError> {
        let invocation = self.bind(invocation);
        debug!(args = ?invocation.to_args(), "kubectl interactive");
        self.runner.interactive(&invocation)
    }

    /// Names of every `resource` in scope.
    pub fn names(&self, resource: &str, scope: NamespaceScope) -> Result<Vec<String>, ApiError> {
        let output = self.capture(
            Invocation::new(["get", resource])
                .args(["-o", JSONPATH_NAMES])
                .namespace(scope),
        )?;
        Ok(split_names(&output))
    }

    /// Container names of one pod, in spec order.
    pub fn container_names(
        &self,
        pod: &str,
        scope: NamespaceScope,
    ) -> Result<Vec<String>, ApiError> {
        if pod.is_empty() {
            return Err(ApiError::InvalidArgument("pod name is required".to_string()));
        }
        let output = self.capture(
            Invocation::new(["get", "pod", pod])
                .args(["-o", JSONPATH_CONTAINER_NAMES])
                .namespace(scope),
        )?;
        Ok(split_names(&output))
    }

    /// Distinct container names across every pod in scope, first seen first.
    pub fn all_container_names(&self, scope: NamespaceScope) -> Result<Vec<String>, ApiError> {
        let output = self.capture(
            Invocation::new(["get", "pods"])
                .args(["-o", JSONPATH_ALL_CONTAINER_NAMES])
                .namespace(scope),
        )?;
        let mut names: Vec<String> = Vec::new();
        for name in split_names(&output) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }

    /// `kubectl get <resource> -o json`, deserialized into a typed list.
    pub fn get_list<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        scope: NamespaceScope,
    ) -> Result<Vec<T>, ApiError> {
        let output = self.capture(
            Invocation::new(["get", resource])
                .args(["-o", "json"])
                .namespace(scope),
        )?;
        let list: ResourceList<T> = serde_json::from_str(&output)
            .map_err(|source| ApiError::OutputParse { what: resource, source })?;
        Ok(list.items)
    }

    /// Client version reported by `kubectl version --client -o json`.
    pub fn client_version(&self) -> Result<String, ApiError> {
        let output = self.capture(Invocation::new(["version", "--client", "-o", "json"]))?;
        let version: ClientVersion = serde_json::from_str(&output).map_err(|source| {
            ApiError::OutputParse {
                what: "version",
                source,
            }
        })?;
        Ok(version.client_version.git_version)
    }
}

fn split_names(output: &str) -> Vec<String> {
    output.split_whitespace().map(str::to_string).collect()
}
