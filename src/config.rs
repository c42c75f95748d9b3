//! Configuration System
//!
//! Optional user-level settings for kcsi: which kubectl binary to run, the debug
//! images offered by `kcsi debug`, the cluster DNS domain, and logging. Layered as
//! defaults, then the global config file (or `--config`), then `KCSI__*` env vars.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KcsiConfig {
    /// kubectl invocation settings
    #[serde(default)]
    pub kubectl: KubectlConfig,

    /// Images used by `kcsi debug`
    #[serde(default)]
    pub debug: DebugConfig,

    /// Internal DNS naming
    #[serde(default)]
    pub dns: DnsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KubectlConfig {
    /// Binary name or path
    #[serde(default = "default_kubectl_binary")]
    pub binary: String,
}

fn default_kubectl_binary() -> String {
    "kubectl".to_string()
}

impl Default for KubectlConfig {
    fn default() -> Self {
        Self {
            binary: default_kubectl_binary(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Full network toolkit, preferred when the cluster already runs it
    #[serde(default = "default_full_image")]
    pub full_image: String,

    /// Small image with a package manager
    #[serde(default = "default_alpine_image")]
    pub alpine_image: String,

    /// Minimal image, used by `--fast` and as the fallback
    #[serde(default = "default_fast_image")]
    pub fast_image: String,
}

fn default_full_image() -> String {
    "nicolaka/netshoot:latest".to_string()
}

fn default_alpine_image() -> String {
    "alpine:latest".to_string()
}

fn default_fast_image() -> String {
    "busybox:latest".to_string()
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            full_image: default_full_image(),
            alpine_image: default_alpine_image(),
            fast_image: default_fast_image(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsConfig {
    #[serde(default = "default_cluster_domain")]
    pub cluster_domain: String,
}

fn default_cluster_domain() -> String {
    "cluster.local".to_string()
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            cluster_domain: default_cluster_domain(),
        }
    }
}

impl KcsiConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.kubectl.binary.trim().is_empty() {
            errors.push("kubectl.binary cannot be empty".to_string());
        }
        for (key, image) in [
            ("debug.full_image", &self.debug.full_image),
            ("debug.alpine_image", &self.debug.alpine_image),
            ("debug.fast_image", &self.debug.fast_image),
        ] {
            if image.trim().is_empty() {
                errors.push(format!("{} cannot be empty", key));
            }
        }
        if self.dns.cluster_domain.trim_matches('.').is_empty() {
            errors.push("dns.cluster_domain cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
