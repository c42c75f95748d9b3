//! Persistence for `contexts.toml`: lazy initialization, load, and atomic save.

use crate::context::layout::StoreLayout;
use crate::context::types::ContextsConfig;
use crate::error::StoreError;
use std::fs;
use std::io::Write;
use std::path::Path;

pub(crate) const DIR_MODE: u32 = 0o755;
pub(crate) const CONFIG_FILE_MODE: u32 = 0o644;
pub(crate) const KUBECONFIG_MODE: u32 = 0o600;

/// Create the store root and `contexts/` if absent, then write an empty
/// config if the file does not exist yet. Idempotent.
pub fn ensure_initialized(layout: &StoreLayout) -> Result<(), StoreError> {
    create_dir_all(layout.root())?;
    create_dir_all(&layout.contexts_dir())?;

    let config_file = layout.config_file();
    if !config_file.exists() {
        tracing::debug!(path = %config_file.display(), "Creating empty contexts file");
        save(layout, &ContextsConfig::default())?;
    }
    Ok(())
}

/// Load the registry. A missing file is an empty registry, not an error.
pub fn load(layout: &StoreLayout) -> Result<ContextsConfig, StoreError> {
    let path = layout.config_file();
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ContextsConfig::default());
        }
        Err(e) => return Err(StoreError::io("read", path, e)),
    };
    toml::from_str(&content).map_err(|source| StoreError::Malformed { path, source })
}

/// Save the registry via a temp file and rename.
pub fn save(layout: &StoreLayout, config: &ContextsConfig) -> Result<(), StoreError> {
    let path = layout.config_file();
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)?;
    let temp_path = path.with_extension("toml.tmp");
    write_file(&temp_path, content.as_bytes(), CONFIG_FILE_MODE)?;

    fs::rename(&temp_path, &path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        StoreError::io("rename temp file to", &path, e)
    })?;
    tracing::debug!(path = %path.display(), contexts = config.contexts.len(), "Saved contexts");
    Ok(())
}

pub(crate) fn create_dir_all(path: &Path) -> Result<(), StoreError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder
        .create(path)
        .map_err(|e| StoreError::io("create directory", path, e))
}

/// Write `data` to `path` (truncating) and apply `mode` on Unix.
pub(crate) fn write_file(path: &Path, data: &[u8], mode: u32) -> Result<(), StoreError> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    let mut file = options
        .open(path)
        .map_err(|e| StoreError::io("write", path, e))?;
    file.write_all(data)
        .map_err(|e| StoreError::io("write", path, e))?;

    // mode() only applies on create; an existing file keeps its old bits otherwise.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
            .map_err(|e| StoreError::io("set permissions on", path, e))?;
    }
    #[cfg(not(unix))]
    let _ = mode;
    Ok(())
}
