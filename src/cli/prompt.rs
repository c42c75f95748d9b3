//! Confirmation prompts for destructive commands.

use crate::error::ApiError;
use dialoguer::Confirm;

pub trait Confirmer {
    /// Ask a yes/no question; `false` unless the user says yes.
    fn confirm(&self, prompt: &str) -> Result<bool, ApiError>;
}

/// Interactive terminal prompt.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &str) -> Result<bool, ApiError> {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| ApiError::PromptFailed(e.to_string()))
    }
}

/// Fixed answer, for non-interactive use.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirmer for FixedAnswer {
    fn confirm(&self, _prompt: &str) -> Result<bool, ApiError> {
        Ok(self.0)
    }
}

/// `Are you sure you want to delete <kind> '<name>'[ in namespace '<ns>']?`
pub fn delete_prompt(kind: &str, name: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) => format!(
            "Are you sure you want to delete {} '{}' in namespace '{}'?",
            kind, name, ns
        ),
        None => format!("Are you sure you want to delete {} '{}'?", kind, name),
    }
}
