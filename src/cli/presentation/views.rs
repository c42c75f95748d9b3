//! Diagnostic view presentation: claim tables, internal domains, pod health,
//! decoded secrets and the debug banner.

use super::shared::{or_none, success, table_with_header, NONE_MARK};
use crate::config::DebugConfig;
use crate::views::{
    ClaimUsage, DebugPlan, DecodedSecret, ImageSource, InternalDomain, ProblemPod, UnboundClaim,
};
use owo_colors::OwoColorize;

/// Printed to stderr before a single decoded value goes to stdout.
pub const SECRET_SHOW_WARNING: &str = "! Displaying secret in plain text";

pub fn format_claim_usage(rows: &[ClaimUsage]) -> String {
    if rows.is_empty() {
        return "No PersistentVolumeClaims found.".to_string();
    }
    let mut table = table_with_header(&[
        "Namespace",
        "PVC",
        "Status",
        "Capacity",
        "Storage Class",
        "Used By Pods",
    ]);
    for row in rows {
        let pods = if row.pods.is_empty() {
            NONE_MARK.to_string()
        } else {
            row.pods.join(", ")
        };
        table.add_row(vec![
            row.namespace.as_str(),
            row.name.as_str(),
            row.phase.as_str(),
            row.capacity.as_str(),
            row.storage_class.as_str(),
            pods.as_str(),
        ]);
    }
    table.to_string()
}

pub fn format_unbound_claims(rows: &[UnboundClaim]) -> String {
    if rows.is_empty() {
        return success("All PVCs are bound!");
    }
    let mut table = table_with_header(&[
        "Namespace",
        "Name",
        "Status",
        "Capacity",
        "Storage Class",
        "Age",
    ]);
    for row in rows {
        table.add_row(vec![
            row.namespace.as_str(),
            row.name.as_str(),
            row.phase.as_str(),
            row.capacity.as_str(),
            row.storage_class.as_str(),
            row.age.as_str(),
        ]);
    }
    format!(
        "{}\n\n{} Found {} unbound PVC(s)",
        table,
        "!".yellow(),
        rows.len()
    )
}

pub fn format_internal_domains(rows: &[InternalDomain]) -> String {
    if rows.is_empty() {
        return "No services or pods with an IP found.".to_string();
    }
    let mut table = table_with_header(&["Type", "Name", "Namespace", "FQDN", "IP", "Info"]);
    for row in rows {
        let kind = row.kind.to_string();
        table.add_row(vec![
            kind.as_str(),
            row.name.as_str(),
            row.namespace.as_str(),
            row.fqdn.as_str(),
            or_none(&row.ip),
            or_none(&row.info),
        ]);
    }
    table.to_string()
}

pub fn format_problem_pods(rows: &[ProblemPod]) -> String {
    if rows.is_empty() {
        return success("No problematic pods found! All pods are Running or Completed.");
    }
    let mut table = table_with_header(&["Namespace", "Name", "Status", "Restarts", "Node"]);
    for row in rows {
        let restarts = row.restarts.to_string();
        table.add_row(vec![
            row.namespace.as_str(),
            row.name.as_str(),
            row.status.as_str(),
            restarts.as_str(),
            row.node.as_str(),
        ]);
    }
    let hints = [
        "CrashLoopBackOff: the container keeps crashing",
        "Error: the container exited with an error",
        "Pending: the pod cannot be scheduled",
        "ImagePullBackOff: the image cannot be pulled",
        "CreateContainerError: the container could not be created",
    ];
    let mut out = format!(
        "{}\n\n{} Found {} pod(s) with issues. Common states to investigate:",
        table,
        "!".yellow(),
        rows.len()
    );
    for hint in hints {
        out.push_str("\n  - ");
        out.push_str(hint);
    }
    out.push_str("\n\nUse 'kcsi logs -n <namespace> <pod>' to investigate further");
    out.push_str("\nUse 'kcsi describe pod <pod> -n <namespace>' for detailed information");
    out
}

/// Plain-text warning, then one row per key.
pub fn format_decoded_secret(secret: &DecodedSecret) -> String {
    let warning = format!(
        "{} Secret values are displayed in plain text\n  Make sure your terminal is not being shared or recorded",
        "!".yellow()
    );
    let title = format!("Secret: {} (namespace: {})", secret.name, secret.namespace);
    if secret.entries.is_empty() {
        return format!("{}\n\n{}\n\nThe secret has no keys.", warning, title);
    }
    let mut table = table_with_header(&["Key", "Value"]);
    for entry in &secret.entries {
        let value = match &entry.value {
            Ok(value) => value.clone(),
            Err(e) => format!("<decode error: {}>", e),
        };
        table.add_row(vec![entry.key.as_str(), value.as_str()]);
    }
    format!("{}\n\n{}\n{}", warning, title, table)
}

/// Lines shown before the interactive debug session starts.
pub fn format_debug_banner(plan: &DebugPlan, config: &DebugConfig) -> String {
    let mut lines = Vec::new();
    match plan.image_source {
        ImageSource::Fast => lines.push("Fast mode: using the lightweight image (limited tools)".to_string()),
        ImageSource::Detected => lines.push(format!("Found {} in the cluster", plan.image)),
        ImageSource::Fallback => lines.push(
            "No known debug image found in the cluster, using the lightweight fallback (tip: -i <image>)"
                .to_string(),
        ),
        ImageSource::Explicit => {}
    }
    match &plan.namespace {
        Some(ns) => lines.push(format!(
            "Creating debug session for pod '{}' in namespace '{}'",
            plan.pod, ns
        )),
        None => lines.push(format!("Creating debug session for pod '{}'", plan.pod)),
    }
    lines.push(format!("Using debug image: {}", plan.image));
    if let Some(target) = &plan.target {
        lines.push(format!("Target container: {}", target));
    }
    if plan.is_heavy_image(config) {
        lines.push("Note: the full toolkit image is large, the first pull may take a while (tip: --fast)".to_string());
    }
    lines.push("Attaching ephemeral debug container (the pod spec is not modified)...".to_string());
    lines.join("\n")
}
