//! `kubectl edit` with a snapshot of the live object saved first.

use crate::error::ApiError;
use crate::kubectl::{Invocation, Kubectl, NamespaceScope};
use chrono::{DateTime, Local};
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use tracing::info;

/// Format of both the editor buffer and the backup file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EditFormat {
    #[default]
    Yaml,
    Json,
}

impl EditFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            EditFormat::Yaml => "yaml",
            EditFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditRequest {
    /// kubectl resource name (`deployment`, `configmap`, ...).
    pub kind: String,
    pub name: String,
    /// `None` for cluster-scoped kinds.
    pub namespace: Option<String>,
    pub format: EditFormat,
    /// Sets `KUBE_EDITOR` for the kubectl process.
    pub editor: Option<String>,
}

impl EditRequest {
    fn scope(&self) -> NamespaceScope {
        NamespaceScope::or_default(self.namespace.clone())
    }

    pub fn invocation(&self) -> Invocation {
        let mut invocation = Invocation::new(["edit", self.kind.as_str(), self.name.as_str()])
            .namespace(self.scope())
            .args(["-o", self.format.as_str()]);
        if let Some(editor) = self.editor.as_deref().filter(|e| !e.trim().is_empty()) {
            invocation = invocation.env("KUBE_EDITOR", editor);
        }
        invocation
    }
}

/// `<kind>-<name>[-<namespace>]-<YYYYmmdd-HHMMSS>.<format>`
pub fn backup_file_name(request: &EditRequest, now: DateTime<Local>) -> String {
    let mut stem = format!("{}-{}", request.kind, request.name);
    if let Some(ns) = &request.namespace {
        stem.push('-');
        stem.push_str(ns);
    }
    format!(
        "{}-{}.{}",
        stem,
        now.format("%Y%m%d-%H%M%S"),
        request.format.as_str()
    )
}

/// Save the object's current state under `dir` and return the file path.
pub fn write_backup(
    kubectl: &Kubectl,
    request: &EditRequest,
    dir: &Path,
    now: DateTime<Local>,
) -> Result<PathBuf, ApiError> {
    let state = kubectl.capture(
        Invocation::new(["get", request.kind.as_str(), request.name.as_str()])
            .namespace(request.scope())
            .args(["-o", request.format.as_str()]),
    )?;
    std::fs::create_dir_all(dir).map_err(|source| ApiError::Io {
        action: "create backup directory",
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(backup_file_name(request, now));
    std::fs::write(&path, state).map_err(|source| ApiError::Io {
        action: "write backup",
        path: path.clone(),
        source,
    })?;
    info!(backup = %path.display(), "Saved resource backup");
    Ok(path)
}
