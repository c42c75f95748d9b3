//! Merge rules: defaults first; later sources override earlier ones key by key.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("kubectl.binary", "kubectl")?
        .set_default("debug.full_image", "nicolaka/netshoot:latest")?
        .set_default("debug.alpine_image", "alpine:latest")?
        .set_default("debug.fast_image", "busybox:latest")?
        .set_default("dns.cluster_domain", "cluster.local")
}
