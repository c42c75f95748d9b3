//! Argument-vector construction for one kubectl call.

use std::path::PathBuf;

/// Where a command looks for namespaced resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceScope {
    /// No flag; kubectl applies its own default namespace.
    Unset,
    /// `-n <ns>`
    Named(String),
    /// `--all-namespaces`
    All,
}

impl NamespaceScope {
    /// A resolved namespace, or kubectl's default when `None`.
    pub fn or_default(namespace: Option<String>) -> Self {
        namespace.map_or(NamespaceScope::Unset, NamespaceScope::Named)
    }

    /// A resolved namespace, or every namespace when `None`.
    pub fn or_all(namespace: Option<String>) -> Self {
        namespace.map_or(NamespaceScope::All, NamespaceScope::Named)
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            NamespaceScope::Named(ns) => Some(ns),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    kubeconfig: Option<PathBuf>,
    args: Vec<String>,
    env: Vec<(String, String)>,
}

impl Invocation {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kubeconfig: None,
            args: args.into_iter().map(Into::into).collect(),
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append `arg` only when `enabled`.
    pub fn flag(self, enabled: bool, arg: impl Into<String>) -> Self {
        if enabled {
            self.arg(arg)
        } else {
            self
        }
    }

    pub fn namespace(self, scope: NamespaceScope) -> Self {
        match scope {
            NamespaceScope::Unset => self,
            NamespaceScope::Named(ns) => self.args(["-n".to_string(), ns]),
            NamespaceScope::All => self.arg("--all-namespaces"),
        }
    }

    pub fn kubeconfig(mut self, path: PathBuf) -> Self {
        self.kubeconfig = Some(path);
        self
    }

    /// Extra environment for the kubectl process (e.g. `KUBE_EDITOR`).
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn envs(&self) -> &[(String, String)] {
        &self.env
    }

    /// Full argument vector, kubeconfig first.
    pub fn to_args(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.args.len() + 2);
        if let Some(path) = &self.kubeconfig {
            out.push("--kubeconfig".to_string());
            out.push(path.to_string_lossy().into_owned());
        }
        out.extend(self.args.iter().cloned());
        out
    }

    /// Arguments without the kubeconfig prefix.
    pub fn command_args(&self) -> &[String] {
        &self.args
    }
}
