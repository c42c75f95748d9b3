//! Error types for kcsi.

use std::path::PathBuf;
use thiserror::Error;

/// Context registry errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to get home directory")]
    HomeDirUnavailable,

    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize contexts: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("context '{0}' already exists")]
    DuplicateName(String),

    #[error("context '{0}' not found")]
    NotFound(String),

    #[error("no current context set")]
    NoCurrentContext,

    #[error("kubeconfig file not found: {}", .0.display())]
    SourceFileNotFound(PathBuf),

    #[error("invalid context name '{0}': must be a non-empty single path component")]
    InvalidName(String),
}

impl StoreError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// True for load/save failures of the registry file itself.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            StoreError::Io { .. } | StoreError::Malformed { .. } | StoreError::Serialize(_)
        )
    }
}

/// Errors surfaced by the CLI layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("kubectl error: {status} - {stderr}")]
    KubectlFailed { status: String, stderr: String },

    #[error("failed to execute {binary}: {source}")]
    KubectlUnavailable {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse kubectl output for {what}: {source}")]
    OutputParse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to get user input: {0}")]
    PromptFailed(String),

    #[error("Failed to write completion script: {0}")]
    CompletionScript(#[source] std::io::Error),

    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no interactive shell found in pod {pod}")]
    NoShell { pod: String, namespace: Option<String> },

    #[error("local port {0} is already in use")]
    PortInUse(u16),

    #[error("secret '{name}': {message}")]
    SecretData { name: String, message: String },

    #[error("{0}")]
    InvalidArgument(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
