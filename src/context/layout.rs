//! Store layout: canonical locations under the registry root. Pure path arithmetic.

use crate::error::StoreError;
use directories::BaseDirs;
use std::path::{Path, PathBuf};

const STORE_DIR: &str = ".kcsi";
const CONTEXTS_FILE: &str = "contexts.toml";
const CONTEXTS_SUBDIR: &str = "contexts";
const KUBECONFIG_NAME: &str = "kube.config";
const BACKUPS_SUBDIR: &str = "backups";

/// Environment variable that replaces `$HOME/.kcsi` as the store root.
pub const STORE_ROOT_ENV: &str = "KCSI_HOME";

/// Registry root: `$KCSI_HOME` when set, otherwise `$HOME/.kcsi`.
pub fn store_root() -> Result<PathBuf, StoreError> {
    if let Some(root) = std::env::var_os(STORE_ROOT_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(root));
    }
    let base = BaseDirs::new().ok_or(StoreError::HomeDirUnavailable)?;
    Ok(base.home_dir().join(STORE_DIR))
}

/// Well-known paths rooted at one store directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayout {
    root: PathBuf,
}

impl StoreLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Layout rooted at [`store_root`].
    pub fn from_home() -> Result<Self, StoreError> {
        Ok(Self::new(store_root()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONTEXTS_FILE)
    }

    pub fn contexts_dir(&self) -> PathBuf {
        self.root.join(CONTEXTS_SUBDIR)
    }

    pub fn context_dir(&self, name: &str) -> PathBuf {
        self.contexts_dir().join(name)
    }

    pub fn context_kubeconfig(&self, name: &str) -> PathBuf {
        self.context_dir(name).join(KUBECONFIG_NAME)
    }

    /// Default destination of pre-edit resource backups.
    pub fn backups_dir(&self) -> PathBuf {
        self.root.join(BACKUPS_SUBDIR)
    }
}

/// Names become directory components under `contexts/`, so they must not
/// escape it.
pub(crate) fn validate_name(name: &str) -> Result<(), StoreError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');
    if invalid {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}
