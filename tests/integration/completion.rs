//! Dynamic shell completion through the clap command tree.

use crate::integration::{harness, with_home_env, write_kubeconfig};
use clap::CommandFactory;
use kcsi::cli::Cli;
use kcsi::context::ContextStore;
use kcsi::kubectl::ScriptedRunner;
use std::ffi::OsString;
use tempfile::TempDir;

fn complete(words: &[&str]) -> Vec<String> {
    let mut command = Cli::command();
    let args: Vec<OsString> = words.iter().map(OsString::from).collect();
    let index = args.len() - 1;
    clap_complete::engine::complete(&mut command, args, index, None)
        .unwrap()
        .iter()
        .map(|c| c.get_value().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_completion_command_prints_registration() {
    let h = harness(ScriptedRunner::new(), true);
    for shell in ["bash", "zsh", "fish"] {
        let script = h.run(&["completion", shell]).unwrap();
        assert!(script.contains("COMPLETE"), "{} registration", shell);
    }
}

#[test]
fn test_context_names_complete_from_registry() {
    let dir = TempDir::new().unwrap();
    let names = with_home_env(&dir, |home| {
        let store = ContextStore::from_home().unwrap();
        let kubeconfig = write_kubeconfig(home, "kubeconfig", "https://127.0.0.1:6443");
        store.add_context("prod", &kubeconfig, "").unwrap();
        store.add_context("staging", &kubeconfig, "").unwrap();
        complete(&["kcsi", "context", "use", "st"])
    });
    assert_eq!(names, vec!["staging"]);
}

#[cfg(target_os = "linux")]
#[test]
fn test_pod_argument_completes_from_kubectl() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let fake_kubectl = dir.path().join("fake-kubectl");
    std::fs::write(&fake_kubectl, "#!/bin/sh\nprintf 'web-1 web-2 api-1'\n").unwrap();
    std::fs::set_permissions(&fake_kubectl, std::fs::Permissions::from_mode(0o755)).unwrap();

    let (pods, containers) = with_home_env(&dir, |_home| {
        let config_dir = dir.path().join("xdg").join("kcsi");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            format!("[kubectl]\nbinary = \"{}\"\n", fake_kubectl.display()),
        )
        .unwrap();
        (
            complete(&["kcsi", "logs", "we"]),
            complete(&["kcsi", "attach", "web-1", "-c", "api"]),
        )
    });
    assert_eq!(pods, vec!["web-1", "web-2"]);
    assert_eq!(containers, vec!["api-1"]);
}

#[test]
fn test_failing_kubectl_yields_no_candidates() {
    let dir = TempDir::new().unwrap();
    let pods = with_home_env(&dir, |_home| {
        let config_dir = dir.path().join("xdg").join("kcsi");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            "[kubectl]\nbinary = \"/nonexistent/kubectl\"\n",
        )
        .unwrap();
        complete(&["kcsi", "logs", "w"])
    });
    assert!(pods.is_empty());
}
