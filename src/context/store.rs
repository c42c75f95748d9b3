//! Context store handle: CRUD over the registry file.
//!
//! Each operation is load → mutate → save. Mutating operations initialize the
//! store first; reads treat a missing file as an empty registry.

use crate::context::layout::{validate_name, StoreLayout};
use crate::context::persistence::{self, KUBECONFIG_MODE};
use crate::context::types::{Context, ContextsConfig};
use crate::error::StoreError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Handle to one registry on disk. Construct explicitly and pass by reference.
#[derive(Debug, Clone)]
pub struct ContextStore {
    layout: StoreLayout,
}

impl ContextStore {
    pub fn new(layout: StoreLayout) -> Self {
        Self { layout }
    }

    /// Store rooted at an arbitrary directory.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self::new(StoreLayout::new(root))
    }

    /// Store rooted at `$KCSI_HOME` or `$HOME/.kcsi`.
    pub fn from_home() -> Result<Self, StoreError> {
        Ok(Self::new(StoreLayout::from_home()?))
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    pub fn ensure_initialized(&self) -> Result<(), StoreError> {
        persistence::ensure_initialized(&self.layout)
    }

    pub fn load(&self) -> Result<ContextsConfig, StoreError> {
        persistence::load(&self.layout)
    }

    pub fn save(&self, config: &ContextsConfig) -> Result<(), StoreError> {
        persistence::save(&self.layout, config)
    }

    /// Register `kubeconfig_path` under `name`. The caller resolves the path.
    pub fn add_context(
        &self,
        name: &str,
        kubeconfig_path: &Path,
        description: &str,
    ) -> Result<Context, StoreError> {
        validate_name(name)?;
        self.ensure_initialized()?;

        let mut config = self.load()?;
        if config.contains(name) {
            return Err(StoreError::DuplicateName(name.to_string()));
        }

        let context = Context::new(name, kubeconfig_path).with_description(description);
        config.contexts.push(context.clone());
        self.save(&config)?;

        info!(context = name, kubeconfig = %kubeconfig_path.display(), "Context added");
        Ok(context)
    }

    /// Copy `source` into managed storage and register the copy under `name`.
    pub fn import_context(
        &self,
        name: &str,
        source: &Path,
        description: &str,
    ) -> Result<Context, StoreError> {
        validate_name(name)?;
        self.ensure_initialized()?;

        if !source.is_file() {
            return Err(StoreError::SourceFileNotFound(source.to_path_buf()));
        }
        if self.load()?.contains(name) {
            return Err(StoreError::DuplicateName(name.to_string()));
        }

        let result = self
            .copy_kubeconfig(name, source)
            .and_then(|dest| self.add_context(name, &dest, description));
        if result.is_err() {
            // Nothing registered under `name`; drop whatever the copy left behind.
            self.remove_context_dir(name);
        }
        result
    }

    fn copy_kubeconfig(&self, name: &str, source: &Path) -> Result<PathBuf, StoreError> {
        persistence::create_dir_all(&self.layout.context_dir(name))?;

        let data = fs::read(source).map_err(|e| StoreError::io("read", source, e))?;
        let dest = self.layout.context_kubeconfig(name);
        persistence::write_file(&dest, &data, KUBECONFIG_MODE)?;
        debug!(source = %source.display(), dest = %dest.display(), bytes = data.len(), "Copied kubeconfig");
        Ok(dest)
    }

    /// All contexts in insertion order.
    pub fn list_contexts(&self) -> Result<Vec<Context>, StoreError> {
        Ok(self.load()?.contexts)
    }

    pub fn get_context(&self, name: &str) -> Result<Context, StoreError> {
        self.load()?
            .find(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Remove `name`, clearing the current pointer if it pointed there and
    /// deleting any managed kubeconfig copy.
    pub fn remove_context(&self, name: &str) -> Result<Context, StoreError> {
        let mut config = self.load()?;
        let index = config
            .contexts
            .iter()
            .position(|ctx| ctx.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        let removed = config.contexts.remove(index);
        if config.current_context == name {
            config.current_context.clear();
        }

        self.save(&config)?;
        if validate_name(name).is_ok() {
            self.remove_context_dir(name);
        }
        info!(context = name, "Context removed");
        Ok(removed)
    }

    pub fn set_current_context(&self, name: &str) -> Result<(), StoreError> {
        let mut config = self.load()?;
        if !config.contains(name) {
            return Err(StoreError::NotFound(name.to_string()));
        }
        config.current_context = name.to_string();
        self.save(&config)?;
        info!(context = name, "Switched current context");
        Ok(())
    }

    /// The active context, or `NoCurrentContext`.
    pub fn current_context(&self) -> Result<Context, StoreError> {
        let config = self.load()?;
        if !config.has_current() {
            return Err(StoreError::NoCurrentContext);
        }
        config
            .find(&config.current_context)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(config.current_context.clone()))
    }

    /// Name of the active context; empty when none is set.
    pub fn current_context_name(&self) -> Result<String, StoreError> {
        Ok(self.load()?.current_context)
    }

    pub fn set_default_namespace(&self, name: &str, namespace: &str) -> Result<(), StoreError> {
        let mut config = self.load()?;
        let context = config
            .find_mut(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        context.default_namespace = namespace.to_string();
        self.save(&config)?;
        debug!(context = name, namespace, "Default namespace updated");
        Ok(())
    }

    pub fn clear_default_namespace(&self, name: &str) -> Result<(), StoreError> {
        self.set_default_namespace(name, "")
    }

    /// Default namespace of `name`; empty when unset.
    pub fn default_namespace(&self, name: &str) -> Result<String, StoreError> {
        Ok(self.get_context(name)?.default_namespace)
    }

    /// Default namespace of the active context.
    pub fn current_default_namespace(&self) -> Result<String, StoreError> {
        Ok(self.current_context()?.default_namespace)
    }

    fn remove_context_dir(&self, name: &str) {
        let dir = self.layout.context_dir(name);
        match fs::remove_dir_all(&dir) {
            Ok(()) => debug!(path = %dir.display(), "Removed context directory"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %dir.display(), error = %e, "Failed to remove context directory"),
        }
    }
}
