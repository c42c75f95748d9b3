//! Namespace resolution for consuming commands.

use crate::context::store::ContextStore;
use crate::error::StoreError;

/// Pick the namespace a command should target.
///
/// An explicit, non-empty `-n` value wins. Otherwise the current context's
/// default namespace applies. `None` means the caller falls back to kubectl's
/// own behavior.
pub fn resolve_namespace(explicit: Option<&str>, store: &ContextStore) -> Option<String> {
    if let Some(ns) = explicit.filter(|ns| !ns.is_empty()) {
        return Some(ns.to_string());
    }

    match store.current_context() {
        Ok(ctx) => ctx.namespace().map(str::to_string),
        Err(StoreError::NoCurrentContext) => None,
        Err(e) => {
            tracing::warn!(error = %e, "Could not read default namespace from context registry");
            None
        }
    }
}
