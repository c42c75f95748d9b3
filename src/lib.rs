//! kcsi: kubectl with a Named-Context Registry
//!
//! A kubectl wrapper that adds a local registry of named kubeconfig contexts
//! with per-context default namespaces, confirmation prompts before deletes,
//! dynamic shell completion, composed diagnostic views and workload actions.
//! Every cluster operation is delegated to a `kubectl` subprocess.

pub mod actions;
pub mod cli;
pub mod completion;
pub mod config;
pub mod context;
pub mod error;
pub mod kubectl;
pub mod logging;
pub mod version;
pub mod views;
