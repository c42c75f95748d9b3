//! Shared test utilities for integration tests
//!
//! Isolated store roots, throwaway kubeconfig files, and a RunContext wired to
//! a scripted kubectl and a fixed confirmation answer.

use clap::Parser;
use kcsi::cli::{Cli, Commands, FixedAnswer, RunContext};
use kcsi::config::KcsiConfig;
use kcsi::context::ContextStore;
use kcsi::kubectl::ScriptedRunner;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes HOME / KCSI_HOME / XDG_CONFIG_HOME access across tests
static HOME_ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    vars: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    const NAMES: [&'static str; 3] = ["HOME", "KCSI_HOME", "XDG_CONFIG_HOME"];

    fn capture() -> Self {
        Self {
            vars: Self::NAMES
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (name, value) in self.vars {
            match value {
                Some(v) => std::env::set_var(name, v),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME inside `test_dir` and KCSI_HOME unset.
/// Returns the HOME used.
pub fn with_home_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce(&Path) -> R,
{
    let _guard = HOME_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let home = test_dir.path().join("home");
    let config_home = test_dir.path().join("xdg");
    std::fs::create_dir_all(&home).unwrap();
    std::fs::create_dir_all(&config_home).unwrap();

    std::env::set_var("HOME", &home);
    std::env::set_var("XDG_CONFIG_HOME", &config_home);
    std::env::remove_var("KCSI_HOME");

    let result = f(&home);

    env_state.restore();
    result
}

/// Write a minimal kubeconfig named `name` under `dir`.
pub fn write_kubeconfig(dir: &Path, name: &str, server: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(
        &path,
        format!(
            "apiVersion: v1\nkind: Config\nclusters:\n- name: c\n  cluster:\n    server: {}\n",
            server
        ),
    )
    .unwrap();
    path
}

pub fn cli(args: &[&str]) -> Commands {
    Cli::try_parse_from(std::iter::once("kcsi").chain(args.iter().copied()))
        .unwrap()
        .command
}

pub struct Harness {
    pub dir: TempDir,
    pub runner: ScriptedRunner,
    answer: bool,
}

pub fn harness(runner: ScriptedRunner, answer: bool) -> Harness {
    Harness {
        dir: TempDir::new().unwrap(),
        runner,
        answer,
    }
}

impl Harness {
    pub fn store_root(&self) -> PathBuf {
        self.dir.path().join(".kcsi")
    }

    pub fn store(&self) -> ContextStore {
        ContextStore::at(self.store_root())
    }

    /// Fresh RunContext per command, the way each CLI invocation starts.
    pub fn run(&self, args: &[&str]) -> Result<String, kcsi::error::ApiError> {
        let ctx = RunContext::with_parts(
            self.store(),
            KcsiConfig::default(),
            Box::new(self.runner.clone()),
            Box::new(FixedAnswer(self.answer)),
        );
        ctx.execute(&cli(args))
    }

    pub fn kubeconfig(&self, name: &str) -> PathBuf {
        write_kubeconfig(self.dir.path(), name, "https://127.0.0.1:6443")
    }
}
