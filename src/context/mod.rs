//! Context registry: named aliases for kubeconfig files, a current selection,
//! and per-context default namespaces.
//! Layout and persistence sit below the store handle; CLI commands consume the handle.

pub mod layout;
pub mod namespace;
pub mod persistence;
pub mod store;
pub mod types;

pub use layout::{store_root, StoreLayout};
pub use namespace::resolve_namespace;
pub use store::ContextStore;
pub use types::{Context, ContextsConfig};
