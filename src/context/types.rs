//! Registry entities: `Context` and the `ContextsConfig` aggregate persisted as one file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One named reference to a cluster access configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub name: String,
    pub kubeconfig_path: PathBuf,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_namespace: String,
}

impl Context {
    pub fn new(name: impl Into<String>, kubeconfig_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            kubeconfig_path: kubeconfig_path.into(),
            description: String::new(),
            default_namespace: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Default namespace, `None` when unset.
    pub fn namespace(&self) -> Option<&str> {
        if self.default_namespace.is_empty() {
            None
        } else {
            Some(&self.default_namespace)
        }
    }
}

/// Contents of `contexts.toml`.
///
/// `current_context` is declared first so it serializes ahead of the
/// `[[contexts]]` array of tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextsConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub current_context: String,
    #[serde(default)]
    pub contexts: Vec<Context>,
}

impl ContextsConfig {
    pub fn find(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|ctx| ctx.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Context> {
        self.contexts.iter_mut().find(|ctx| ctx.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn has_current(&self) -> bool {
        !self.current_context.is_empty()
    }
}
