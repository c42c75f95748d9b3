//! CLI presentation: text formatters per command family.

mod context;
mod shared;
mod views;

pub use context::{
    format_context_added, format_context_imported, format_context_list, format_context_removed,
    format_context_switched, format_current_context, format_default_namespace,
    format_namespace_cleared, format_namespace_set, format_no_current_context,
};
pub use shared::success;
pub use views::{
    format_claim_usage, format_debug_banner, format_decoded_secret, format_internal_domains,
    format_problem_pods, format_unbound_claims, SECRET_SHOW_WARNING,
};
