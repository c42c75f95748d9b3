//! Config loader: assembles sources in precedence order and deserializes.

use super::merge::builder_with_defaults;
use super::sources::{environment, global_file};
use super::KcsiConfig;
use crate::error::ApiError;
use config::File;
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global config file if present, then `KCSI__*` env vars.
    pub fn load() -> Result<KcsiConfig, ApiError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder);
        Self::finish(builder)
    }

    /// Defaults, then `path` (required), then `KCSI__*` env vars.
    pub fn load_from_file(path: &Path) -> Result<KcsiConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder);
        Self::finish(builder)
    }

    /// Built-in defaults only.
    pub fn default() -> KcsiConfig {
        KcsiConfig::default()
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<KcsiConfig, ApiError> {
        let config: KcsiConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(|errors| {
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            ))
        })?;
        Ok(config)
    }
}
