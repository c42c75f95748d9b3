//! Dynamic shell completion through `clap_complete`.
//!
//! The shell re-invokes `kcsi` with `COMPLETE=<shell>`; `CompleteEnv` in the
//! binary answers before normal parsing. Candidate functions below are
//! attached to arguments with `ArgValueCandidates` and read the home registry
//! and config themselves, since no `RunContext` exists at that point.

use super::{CompletionKind, CompletionRequest, CompletionSource};
use crate::config::ConfigLoader;
use crate::context::{resolve_namespace, ContextStore};
use crate::error::ApiError;
use crate::kubectl::{Kubectl, ProcessRunner};
use clap::ValueEnum;
use clap_complete::engine::CompletionCandidate;
use clap_complete::env::{EnvCompleter, Shells};
use std::io::Write;
use tracing::debug;

/// Environment variable the registration scripts set when asking for candidates.
pub const COMPLETE_ENV: &str = "COMPLETE";

/// Shells `kcsi completion` can register with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Elvish,
    Powershell,
}

impl CompletionShell {
    /// Name `clap_complete` knows the shell by.
    pub fn name(self) -> &'static str {
        match self {
            CompletionShell::Bash => "bash",
            CompletionShell::Zsh => "zsh",
            CompletionShell::Fish => "fish",
            CompletionShell::Elvish => "elvish",
            CompletionShell::Powershell => "powershell",
        }
    }
}

/// Registration script for `shell`; `completer` is the program the script calls back.
pub fn registration_script(shell: CompletionShell, completer: &str) -> Result<String, ApiError> {
    let shells = Shells::builtins();
    let env_completer: &dyn EnvCompleter = shells.completer(shell.name()).ok_or_else(|| {
        ApiError::InvalidArgument(format!("unsupported shell '{}'", shell.name()))
    })?;
    let mut buf: Vec<u8> = Vec::new();
    env_completer
        .write_registration(COMPLETE_ENV, "kcsi", "kcsi", completer, &mut buf)
        .map_err(ApiError::CompletionScript)?;
    buf.flush().map_err(ApiError::CompletionScript)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn namespaces() -> Vec<CompletionCandidate> {
    home_candidates(CompletionKind::Namespaces)
}

pub fn pods() -> Vec<CompletionCandidate> {
    home_candidates(CompletionKind::Pods)
}

pub fn containers() -> Vec<CompletionCandidate> {
    home_candidates(CompletionKind::Containers)
}

pub fn secrets() -> Vec<CompletionCandidate> {
    home_candidates(CompletionKind::Secrets)
}

pub fn nodes() -> Vec<CompletionCandidate> {
    home_candidates(CompletionKind::Nodes)
}

pub fn contexts() -> Vec<CompletionCandidate> {
    home_candidates(CompletionKind::Contexts)
}

/// Errors yield no candidates; a shell has nowhere to show them.
fn home_candidates(kind: CompletionKind) -> Vec<CompletionCandidate> {
    match load_names(kind) {
        Ok(names) => names.into_iter().map(CompletionCandidate::new).collect(),
        Err(e) => {
            debug!(kind = ?kind, error = %e, "No completion candidates");
            Vec::new()
        }
    }
}

fn load_names(kind: CompletionKind) -> Result<Vec<String>, ApiError> {
    let config = ConfigLoader::load()?;
    let store = ContextStore::from_home()?;
    let kubectl = Kubectl::for_current_context(
        Box::new(ProcessRunner::new(config.kubectl.binary)),
        &store,
    );
    // The shell hands over no parsed `-n`, so the context default scopes the query.
    let request = CompletionRequest {
        namespace: resolve_namespace(None, &store),
        ..CompletionRequest::default()
    };
    CompletionSource::new(&kubectl, &store).candidates(kind, &request)
}
