//! Integration tests for kcsi

mod completion;
mod config_integration;
mod context_cli;
mod context_store;
mod test_utils;
mod views;
mod workloads;

pub use test_utils::{harness, with_home_env, write_kubeconfig, Harness};
