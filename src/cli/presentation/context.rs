//! Context registry presentation.

use super::shared::{or_none, success, table_with_header};
use crate::context::Context;
use std::path::Path;

pub fn format_context_added(context: &Context) -> String {
    let mut out = success(format!("Context '{}' added successfully", context.name));
    out.push_str(&format!("\n  Kubeconfig: {}", context.kubeconfig_path.display()));
    push_description(&mut out, context);
    push_activation_hint(&mut out, &context.name);
    out
}

pub fn format_context_imported(context: &Context, source: &Path) -> String {
    let mut out = success(format!("Context '{}' imported successfully", context.name));
    out.push_str(&format!("\n  Source: {}", source.display()));
    out.push_str(&format!("\n  Imported to: {}", context.kubeconfig_path.display()));
    push_description(&mut out, context);
    push_activation_hint(&mut out, &context.name);
    out
}

fn push_description(out: &mut String, context: &Context) {
    if !context.description.is_empty() {
        out.push_str(&format!("\n  Description: {}", context.description));
    }
}

fn push_activation_hint(out: &mut String, name: &str) {
    out.push_str(&format!(
        "\n\nUse 'kcsi context use {}' to activate this context",
        name
    ));
}

pub fn format_context_list(contexts: &[Context], current: &str) -> String {
    if contexts.is_empty() {
        return "No contexts configured yet.\n\nUse 'kcsi context import <name> <kubeconfig-path>' to add your first context".to_string();
    }

    let mut table = table_with_header(&["Current", "Name", "Kubeconfig", "Default NS", "Description"]);
    for context in contexts {
        let marker = if !current.is_empty() && context.name == current {
            "*"
        } else {
            ""
        };
        let path = context.kubeconfig_path.display().to_string();
        table.add_row(vec![
            marker,
            context.name.as_str(),
            path.as_str(),
            or_none(&context.default_namespace),
            or_none(&context.description),
        ]);
    }
    table.to_string()
}

pub fn format_context_switched(context: &Context) -> String {
    let mut out = success(format!("Switched to context '{}'", context.name));
    if !context.description.is_empty() {
        out.push_str(&format!("\n  {}", context.description));
    }
    if let Some(ns) = context.namespace() {
        out.push_str(&format!("\n  Default namespace: {}", ns));
    }
    out
}

pub fn format_no_current_context() -> String {
    "No context currently active\n\nUse 'kcsi context use <name>' to activate a context".to_string()
}

pub fn format_current_context(context: &Context) -> String {
    let mut out = format!(
        "Current context: {}\nKubeconfig: {}",
        context.name,
        context.kubeconfig_path.display()
    );
    if !context.description.is_empty() {
        out.push_str(&format!("\nDescription: {}", context.description));
    }
    if let Some(ns) = context.namespace() {
        out.push_str(&format!("\nDefault namespace: {}", ns));
    }
    out
}

pub fn format_context_removed(context: &Context, was_current: bool) -> String {
    let mut out = success(format!("Context '{}' removed successfully", context.name));
    if was_current {
        out.push_str("\n  It was the active context; no context is active now.");
    }
    out
}

pub fn format_namespace_set(context: &str, namespace: &str) -> String {
    format!(
        "{}\n\nAll kcsi commands will now use this namespace by default.\nYou can still override it with -n/--namespace flag.",
        success(format!(
            "Default namespace set to '{}' for context '{}'",
            namespace, context
        ))
    )
}

pub fn format_namespace_cleared(context: &str) -> String {
    format!(
        "{}\n\nkcsi commands will now use kubectl's default namespace behavior.",
        success(format!("Default namespace cleared for context '{}'", context))
    )
}

pub fn format_default_namespace(context: &Context) -> String {
    match context.namespace() {
        Some(ns) => format!("Default namespace for context '{}': {}", context.name, ns),
        None => format!(
            "No default namespace set for context '{}'\n\nUse 'kcsi context set-namespace <namespace>' to set one",
            context.name
        ),
    }
}
