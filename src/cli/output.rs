//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, StoreError};

/// Map domain/service errors to a string for CLI output, with a hint when
/// the user has an obvious next step.
pub fn map_error(e: &ApiError) -> String {
    match hint(e) {
        Some(hint) => format!("Error: {}\n\n{}", e, hint),
        None => format!("Error: {}", e),
    }
}

fn hint(e: &ApiError) -> Option<String> {
    match e {
        ApiError::Store(StoreError::NoCurrentContext) => {
            Some("Use 'kcsi context use <name>' to activate a context".to_string())
        }
        ApiError::Store(StoreError::NotFound(_)) => {
            Some("Use 'kcsi context list' to see available contexts".to_string())
        }
        ApiError::Store(StoreError::DuplicateName(name)) => Some(format!(
            "Use 'kcsi context remove {}' first, or pick another name",
            name
        )),
        ApiError::KubectlUnavailable { .. } => Some(
            "Install kubectl or set kubectl.binary in the kcsi config file".to_string(),
        ),
        ApiError::NoShell { namespace: None, .. } => Some(
            "Did you forget to specify the namespace with -n, or to set a context default?"
                .to_string(),
        ),
        ApiError::PortInUse(_) => Some(
            "Choose a different local port or stop the process using it".to_string(),
        ),
        _ => None,
    }
}
