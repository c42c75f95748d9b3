//! Diagnostic Views
//!
//! Composed read-only views built from kubectl queries: claim usage, unbound
//! claims, internal DNS names, pod health, decoded secrets and debug container
//! planning. Each view is a pure function over typed resources plus a
//! `fetch_*` wrapper that runs the queries.

/// Placeholder for absent values in view rows and table cells.
pub const NONE_MARK: &str = "-";

pub mod debug;
pub mod domains;
pub mod health;
pub mod pvc;
pub mod secrets;

pub use debug::{plan_debug, select_image, DebugPlan, DebugRequest, ImageSource};
pub use domains::{fetch_internal_domains, internal_domains, DomainKind, InternalDomain};
pub use health::{fetch_problem_pods, pod_status, problem_pods, ProblemPod};
pub use pvc::{
    claim_to_pods, claim_usage, fetch_claim_usage, fetch_unbound_claims, unbound_claims,
    ClaimUsage, UnboundClaim,
};
pub use secrets::{
    decode_secret, decode_value, fetch_secret, secret_value, DecodedEntry, DecodedSecret,
};
