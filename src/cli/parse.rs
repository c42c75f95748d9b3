//! CLI parse: clap types for kcsi. No behavior; definitions only.

use crate::actions::{DryRun, EditFormat, PortMapping};
use crate::completion::shell::{self, CompletionShell};
use crate::completion::CompletionKind;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::engine::ArgValueCandidates;
use std::path::PathBuf;

/// kcsi - kubectl with completion, confirmations and named contexts
#[derive(Parser)]
#[command(name = "kcsi")]
#[command(version)]
#[command(about = "kubectl wrapper with namespace-aware completion, confirmations and named contexts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log file path (logs go to stderr when unset)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage named kubeconfig contexts
    Context {
        #[command(subcommand)]
        command: ContextCommands,
    },
    /// Display resources
    Get {
        #[command(subcommand)]
        command: GetCommands,
    },
    /// Show details of a resource
    Describe {
        kind: ResourceKind,
        name: String,
        #[arg(short, long, add = ArgValueCandidates::new(shell::namespaces))]
        namespace: Option<String>,
    },
    /// Print the logs of a pod
    Logs {
        #[arg(add = ArgValueCandidates::new(shell::pods))]
        pod: String,
        #[arg(short, long, add = ArgValueCandidates::new(shell::namespaces))]
        namespace: Option<String>,
        /// Follow log output
        #[arg(short, long)]
        follow: bool,
        /// Logs of the previous container instance
        #[arg(short, long)]
        previous: bool,
        /// Lines of recent log output to show (default: all)
        #[arg(long)]
        tail: Option<i64>,
        /// Container name (for multi-container pods)
        #[arg(short, long, add = ArgValueCandidates::new(shell::containers))]
        container: Option<String>,
    },
    /// List events sorted by time (all namespaces when none resolves)
    Events {
        #[arg(short, long, add = ArgValueCandidates::new(shell::namespaces))]
        namespace: Option<String>,
        /// Watch for new events
        #[arg(short, long)]
        watch: bool,
    },
    /// Delete a resource after confirmation
    Delete {
        kind: ResourceKind,
        name: String,
        #[arg(short, long, add = ArgValueCandidates::new(shell::namespaces))]
        namespace: Option<String>,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Attach an ephemeral debug container to a pod
    Debug {
        #[arg(add = ArgValueCandidates::new(shell::pods))]
        pod: String,
        #[arg(short, long, add = ArgValueCandidates::new(shell::namespaces))]
        namespace: Option<String>,
        /// Debug image (default: detected from the cluster)
        #[arg(short, long)]
        image: Option<String>,
        /// Target container (default: the pod's first container)
        #[arg(short, long, add = ArgValueCandidates::new(shell::containers))]
        container: Option<String>,
        /// Use the lightweight image
        #[arg(short, long)]
        fast: bool,
    },
    /// Cluster health checks
    Check {
        #[command(subcommand)]
        command: CheckCommands,
    },
    /// Manage rollouts of deployments, daemonsets and statefulsets
    Rollout {
        #[command(subcommand)]
        command: RolloutCommands,
    },
    /// CPU and memory usage of pods or nodes
    Top {
        #[command(subcommand)]
        command: TopCommands,
    },
    /// Run a command in a pod: kcsi execute <pod> -- <command...>
    #[command(alias = "exec")]
    Execute {
        #[arg(add = ArgValueCandidates::new(shell::pods))]
        pod: String,
        #[arg(short, long, add = ArgValueCandidates::new(shell::namespaces))]
        namespace: Option<String>,
        /// Container name (for multi-container pods)
        #[arg(short, long, add = ArgValueCandidates::new(shell::containers))]
        container: Option<String>,
        /// Command and arguments, after `--`
        #[arg(last = true, required = true)]
        command: Vec<String>,
    },
    /// Open an interactive shell in a pod (tries bash, zsh, then sh)
    Attach {
        #[arg(add = ArgValueCandidates::new(shell::pods))]
        pod: String,
        #[arg(short, long, add = ArgValueCandidates::new(shell::namespaces))]
        namespace: Option<String>,
        /// Container name (for multi-container pods)
        #[arg(short, long, add = ArgValueCandidates::new(shell::containers))]
        container: Option<String>,
    },
    /// Forward a local port to a pod port
    #[command(alias = "pf")]
    PortForward {
        #[arg(add = ArgValueCandidates::new(shell::pods))]
        pod: String,
        /// localPort:remotePort, e.g. 8080:80
        mapping: PortMapping,
        #[arg(short, long, add = ArgValueCandidates::new(shell::namespaces))]
        namespace: Option<String>,
    },
    /// Edit a resource in your editor, saving a backup first
    Edit {
        kind: ResourceKind,
        name: String,
        #[arg(short, long, add = ArgValueCandidates::new(shell::namespaces))]
        namespace: Option<String>,
        /// Editor buffer and backup format
        #[arg(short, long, value_enum, default_value_t = EditFormat::Yaml)]
        output: EditFormat,
        /// Backup directory (default: <kcsi home>/backups)
        #[arg(long)]
        backup_dir: Option<PathBuf>,
        /// Skip the backup
        #[arg(long)]
        no_backup: bool,
        /// Editor command (default: KUBE_EDITOR or EDITOR)
        #[arg(short, long)]
        editor: Option<String>,
    },
    /// Apply manifests from a file, directory or kustomization
    Apply {
        /// Manifest file, or directory with --recursive
        #[arg(short, long, conflicts_with = "kustomize")]
        filename: Option<PathBuf>,
        /// Kustomization directory (repeatable)
        #[arg(short, long)]
        kustomize: Vec<PathBuf>,
        #[arg(short, long, add = ArgValueCandidates::new(shell::namespaces))]
        namespace: Option<String>,
        /// Process the directory given to -f recursively
        #[arg(long)]
        recursive: bool,
        /// Only print what would be applied (client when no value is given)
        #[arg(long, value_enum, num_args = 0..=1, default_missing_value = "client")]
        dry_run: Option<DryRun>,
        /// Validate manifests before applying
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        validate: bool,
        /// Delete and re-create resources when needed
        #[arg(long)]
        force: bool,
        /// Output format (name, yaml, json, ...)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Run dig inside a pod to debug DNS resolution
    Dig {
        #[arg(add = ArgValueCandidates::new(shell::pods))]
        pod: String,
        #[arg(short, long, add = ArgValueCandidates::new(shell::namespaces))]
        namespace: Option<String>,
        /// Container name (for multi-container pods)
        #[arg(short, long, add = ArgValueCandidates::new(shell::containers))]
        container: Option<String>,
        /// Domain and extra dig arguments
        #[arg(trailing_var_arg = true)]
        query: Vec<String>,
    },
    /// Print version information
    Version {
        /// Include platform and kubectl client details
        #[arg(long)]
        detailed: bool,
    },
    /// Print the shell registration script: source <(kcsi completion bash)
    Completion { shell: CompletionShell },
    /// Completion candidates, one per line, for scripts of your own
    #[command(name = "__complete", hide = true)]
    Complete {
        kind: CompletionKind,
        /// Only names starting with this prefix
        prefix: Option<String>,
        #[arg(short, long, add = ArgValueCandidates::new(shell::namespaces))]
        namespace: Option<String>,
        /// Pod whose containers to list
        #[arg(long)]
        pod: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ContextCommands {
    /// Register an existing kubeconfig file under a name
    Add {
        name: String,
        kubeconfig: PathBuf,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Copy a kubeconfig file into kcsi storage and register it
    Import {
        name: String,
        kubeconfig: PathBuf,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// List contexts
    #[command(alias = "ls")]
    List,
    /// Activate a context
    Use {
        #[arg(add = ArgValueCandidates::new(shell::contexts))]
        name: String,
    },
    /// Show the active context
    Current,
    /// Remove a context (and its imported kubeconfig copy)
    #[command(aliases = ["rm", "delete"])]
    Remove {
        #[arg(add = ArgValueCandidates::new(shell::contexts))]
        name: String,
    },
    /// Set the default namespace of the active context
    SetNamespace {
        #[arg(add = ArgValueCandidates::new(shell::namespaces))]
        namespace: String,
    },
    /// Clear the default namespace of the active context
    ClearNamespace,
    /// Show the default namespace of the active context
    GetNamespace,
}

/// Namespace selection shared by list commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[arg(short, long, add = ArgValueCandidates::new(shell::namespaces))]
    pub namespace: Option<String>,
    /// List across all namespaces
    #[arg(short = 'A', long, conflicts_with = "namespace")]
    pub all_namespaces: bool,
    /// Output format (wide, yaml, json, ...)
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Namespace and pass-through output for the claim views.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Namespace to query (default: context namespace, else all)
    #[arg(short, long, add = ArgValueCandidates::new(shell::namespaces))]
    pub namespace: Option<String>,
    /// Skip the view and print `kubectl get pvc -o <format>`
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(Subcommand)]
pub enum GetCommands {
    #[command(alias = "po")]
    Pods(ListArgs),
    #[command(aliases = ["svc", "service"])]
    Services(ListArgs),
    #[command(aliases = ["deploy", "deployment"])]
    Deployments(ListArgs),
    #[command(aliases = ["cm", "configmap"])]
    Configmaps(ListArgs),
    /// Secrets, or their decoded values
    #[command(alias = "secret")]
    Secrets {
        #[command(subcommand)]
        view: Option<SecretView>,
        #[command(flatten)]
        args: ListArgs,
    },
    #[command(aliases = ["sts", "statefulset"])]
    Statefulsets(ListArgs),
    #[command(aliases = ["ds", "daemonset"])]
    Daemonsets(ListArgs),
    #[command(aliases = ["no", "node"])]
    Nodes(ListArgs),
    #[command(aliases = ["ns", "namespace"])]
    Namespaces(ListArgs),
    /// PersistentVolumeClaims, or one of the claim views
    #[command(aliases = ["pvcs", "persistentvolumeclaim", "persistentvolumeclaims"])]
    Pvc {
        #[command(subcommand)]
        view: Option<PvcView>,
        #[command(flatten)]
        args: ListArgs,
    },
    /// Internal DNS names of services and pods
    #[command(aliases = ["idomains", "idom"])]
    InternalDomains {
        #[arg(short, long, add = ArgValueCandidates::new(shell::namespaces))]
        namespace: Option<String>,
    },
}

/// One secret in the resolved namespace.
#[derive(Args, Debug, Clone)]
pub struct SecretArgs {
    #[arg(add = ArgValueCandidates::new(shell::secrets))]
    pub name: String,
    /// Namespace of the secret (default: context namespace; one is required)
    #[arg(short, long, add = ArgValueCandidates::new(shell::namespaces))]
    pub namespace: Option<String>,
}

#[derive(Subcommand)]
pub enum SecretView {
    /// Every key with its decoded value
    Decoded(SecretArgs),
    /// The decoded value of one key, alone on stdout
    Show {
        #[command(flatten)]
        secret: SecretArgs,
        /// Key to print
        #[arg(short, long)]
        key: String,
    },
}

#[derive(Subcommand)]
pub enum CheckCommands {
    /// Pods that are neither Running nor Completed
    #[command(aliases = ["err", "error"])]
    Errors {
        #[arg(short, long, add = ArgValueCandidates::new(shell::namespaces))]
        namespace: Option<String>,
    },
}

/// Workload addressed by rollout commands.
#[derive(Args, Debug, Clone)]
pub struct RolloutTarget {
    pub kind: RolloutKind,
    pub name: String,
    #[arg(short, long, add = ArgValueCandidates::new(shell::namespaces))]
    pub namespace: Option<String>,
}

#[derive(Subcommand)]
pub enum RolloutCommands {
    /// Restart by triggering a new rollout
    Restart(RolloutTarget),
    /// Watch the rollout until it completes
    Status(RolloutTarget),
    /// List previous revisions
    History(RolloutTarget),
    /// Roll back to a previous revision
    Undo {
        #[command(flatten)]
        target: RolloutTarget,
        /// Revision to roll back to (0: the previous one)
        #[arg(long, default_value_t = 0)]
        to_revision: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RolloutKind {
    #[value(aliases = ["deploy", "deployments"])]
    Deployment,
    #[value(aliases = ["ds", "daemonsets"])]
    Daemonset,
    #[value(aliases = ["sts", "statefulsets"])]
    Statefulset,
}

impl RolloutKind {
    pub fn as_kubectl(self) -> &'static str {
        match self {
            RolloutKind::Deployment => "deployment",
            RolloutKind::Daemonset => "daemonset",
            RolloutKind::Statefulset => "statefulset",
        }
    }
}

#[derive(Subcommand)]
pub enum TopCommands {
    /// Pod usage (all namespaces when none resolves)
    #[command(alias = "po")]
    Pods {
        #[arg(short, long, add = ArgValueCandidates::new(shell::namespaces))]
        namespace: Option<String>,
    },
    /// Node usage, optionally for one node
    #[command(aliases = ["no", "node"])]
    Nodes {
        #[arg(add = ArgValueCandidates::new(shell::nodes))]
        node: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PvcView {
    /// Claims with the pods that mount them
    Pods(ViewArgs),
    /// Claims whose phase is not Bound
    Unbound(ViewArgs),
}

/// Resource kinds accepted by describe and delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    #[value(aliases = ["po", "pods"])]
    Pod,
    #[value(aliases = ["svc", "services"])]
    Service,
    #[value(aliases = ["deploy", "deployments"])]
    Deployment,
    #[value(aliases = ["cm", "configmaps"])]
    Configmap,
    #[value(alias = "secrets")]
    Secret,
    #[value(aliases = ["sts", "statefulsets"])]
    Statefulset,
    #[value(aliases = ["ds", "daemonsets"])]
    Daemonset,
    #[value(alias = "pvcs")]
    Pvc,
    #[value(aliases = ["no", "nodes"])]
    Node,
    #[value(aliases = ["ns", "namespaces"])]
    Namespace,
}

impl ResourceKind {
    /// Resource name passed to kubectl.
    pub fn as_kubectl(self) -> &'static str {
        match self {
            ResourceKind::Pod => "pod",
            ResourceKind::Service => "service",
            ResourceKind::Deployment => "deployment",
            ResourceKind::Configmap => "configmap",
            ResourceKind::Secret => "secret",
            ResourceKind::Statefulset => "statefulset",
            ResourceKind::Daemonset => "daemonset",
            ResourceKind::Pvc => "pvc",
            ResourceKind::Node => "node",
            ResourceKind::Namespace => "namespace",
        }
    }

    pub fn is_namespaced(self) -> bool {
        !matches!(self, ResourceKind::Node | ResourceKind::Namespace)
    }
}

impl GetCommands {
    /// Plain listings: kubectl resource plus shared args.
    pub fn listing(&self) -> Option<(&'static str, &ListArgs)> {
        match self {
            GetCommands::Pods(args) => Some(("pods", args)),
            GetCommands::Services(args) => Some(("services", args)),
            GetCommands::Deployments(args) => Some(("deployments", args)),
            GetCommands::Configmaps(args) => Some(("configmaps", args)),
            GetCommands::Secrets { view: None, args } => Some(("secrets", args)),
            GetCommands::Statefulsets(args) => Some(("statefulsets", args)),
            GetCommands::Daemonsets(args) => Some(("daemonsets", args)),
            GetCommands::Nodes(args) => Some(("nodes", args)),
            GetCommands::Namespaces(args) => Some(("namespaces", args)),
            GetCommands::Pvc { view: None, args } => Some(("pvc", args)),
            GetCommands::Pvc { view: Some(_), .. }
            | GetCommands::Secrets { view: Some(_), .. }
            | GetCommands::InternalDomains { .. } => None,
        }
    }
}
