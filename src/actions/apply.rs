//! `kubectl apply` from a manifest path or kustomization directories.

use crate::error::ApiError;
use crate::kubectl::{Invocation, NamespaceScope};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

const MANIFEST_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DryRun {
    Client,
    Server,
}

impl DryRun {
    fn flag(self) -> &'static str {
        match self {
            DryRun::Client => "--dry-run=client",
            DryRun::Server => "--dry-run=server",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplySource {
    /// `-f`: a manifest file, or a directory when `recursive`.
    File { path: PathBuf, recursive: bool },
    /// `-k`, once per directory.
    Kustomize(Vec<PathBuf>),
}

#[derive(Debug, Clone)]
pub struct ApplyRequest {
    pub source: ApplySource,
    pub namespace: Option<String>,
    pub dry_run: Option<DryRun>,
    pub validate: bool,
    pub force: bool,
    pub output: Option<String>,
}

impl ApplyRequest {
    /// Check the local paths and build the invocation. The second value is a
    /// warning for files without a manifest extension.
    pub fn invocation(&self) -> Result<(Invocation, Option<String>), ApiError> {
        let mut warning = None;
        let mut invocation = Invocation::new(["apply"]);
        match &self.source {
            ApplySource::Kustomize(dirs) => {
                if dirs.is_empty() {
                    return Err(ApiError::InvalidArgument(
                        "must specify either --filename (-f) or --kustomize (-k)".to_string(),
                    ));
                }
                for dir in dirs {
                    invocation = invocation.args(["-k".to_string(), display(dir)]);
                }
            }
            ApplySource::File { path, recursive } => {
                if !path.exists() {
                    return Err(ApiError::InvalidArgument(format!(
                        "file or directory '{}' does not exist",
                        path.display()
                    )));
                }
                invocation = invocation.args(["-f".to_string(), display(path)]);
                if path.is_dir() {
                    if !recursive {
                        return Err(ApiError::InvalidArgument(format!(
                            "'{}' is a directory, use --recursive to process it",
                            path.display()
                        )));
                    }
                    invocation = invocation.arg("--recursive");
                } else if !has_manifest_extension(path) {
                    warning = Some(format!(
                        "file '{}' does not have a typical Kubernetes manifest extension (.yaml, .yml, .json)",
                        path.display()
                    ));
                }
            }
        }
        invocation = invocation.namespace(NamespaceScope::or_default(self.namespace.clone()));
        if let Some(dry_run) = self.dry_run {
            invocation = invocation.arg(dry_run.flag());
        }
        invocation = invocation
            .flag(!self.validate, "--validate=false")
            .flag(self.force, "--force");
        if let Some(output) = &self.output {
            invocation = invocation.args(["-o", output.as_str()]);
        }
        Ok((invocation, warning))
    }
}

fn has_manifest_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| MANIFEST_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
