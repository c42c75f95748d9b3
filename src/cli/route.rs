//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::actions::{self, ApplyRequest, ApplySource, EditRequest, ShellTarget};
use crate::cli::command_name;
use crate::cli::parse::{
    CheckCommands, Commands, ContextCommands, GetCommands, ListArgs, PvcView, RolloutCommands,
    RolloutTarget, SecretView, TopCommands, ViewArgs,
};
use crate::cli::presentation::{
    format_claim_usage, format_context_added, format_context_imported, format_context_list,
    format_context_removed, format_context_switched, format_current_context,
    format_debug_banner, format_decoded_secret, format_default_namespace,
    format_internal_domains, format_namespace_cleared, format_namespace_set,
    format_no_current_context, format_problem_pods, format_unbound_claims, success,
    SECRET_SHOW_WARNING,
};
use crate::cli::prompt::{delete_prompt, Confirmer, TerminalConfirmer};
use crate::completion::shell::registration_script;
use crate::completion::{CompletionKind, CompletionRequest, CompletionSource};
use crate::config::{ConfigLoader, KcsiConfig};
use crate::context::{resolve_namespace, ContextStore};
use crate::error::{ApiError, StoreError};
use crate::kubectl::{Invocation, Kubectl, KubectlRunner, NamespaceScope, ProcessRunner};
use crate::version;
use crate::views::{self, DebugRequest};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: registry handle, app config, kubectl and prompts.
pub struct RunContext {
    store: ContextStore,
    config: KcsiConfig,
    kubectl: Kubectl,
    confirmer: Box<dyn Confirmer>,
}

impl RunContext {
    /// Load config (from `config_path` when given), open the home registry and
    /// bind kubectl to the current context.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        let store = ContextStore::from_home()?;
        let runner = ProcessRunner::new(config.kubectl.binary.clone());
        Ok(Self::with_parts(
            store,
            config,
            Box::new(runner),
            Box::new(TerminalConfirmer),
        ))
    }

    /// Assemble from explicit parts.
    pub fn with_parts(
        store: ContextStore,
        config: KcsiConfig,
        runner: Box<dyn KubectlRunner>,
        confirmer: Box<dyn Confirmer>,
    ) -> Self {
        let kubectl = Kubectl::for_current_context(runner, &store);
        Self {
            store,
            config,
            kubectl,
            confirmer,
        }
    }

    pub fn store(&self) -> &ContextStore {
        &self.store
    }

    pub fn kubectl(&self) -> &Kubectl {
        &self.kubectl
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let name = command_name(command);
        debug!(command = %name, "Executing command");
        let result = self.execute_inner(command);
        match &result {
            Ok(_) => info!(command = %name, "Command completed"),
            Err(e) => debug!(command = %name, error = %e, "Command failed"),
        }
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Context { command } => self.handle_context_command(command),
            Commands::Get { command } => self.handle_get_command(command),
            Commands::Describe {
                kind,
                name,
                namespace,
            } => {
                let scope = if kind.is_namespaced() {
                    NamespaceScope::or_default(self.namespace(namespace))
                } else {
                    NamespaceScope::Unset
                };
                self.passthrough(
                    Invocation::new(["describe", kind.as_kubectl(), name.as_str()]).namespace(scope),
                )
            }
            Commands::Logs {
                pod,
                namespace,
                follow,
                previous,
                tail,
                container,
            } => {
                let mut invocation = Invocation::new(["logs"])
                    .namespace(NamespaceScope::or_default(self.namespace(namespace)))
                    .arg(pod.as_str())
                    .flag(*follow, "-f")
                    .flag(*previous, "-p");
                if let Some(tail) = tail.filter(|t| *t >= 0) {
                    invocation = invocation.arg(format!("--tail={}", tail));
                }
                if let Some(container) = container {
                    invocation = invocation.args(["-c", container.as_str()]);
                }
                self.passthrough(invocation)
            }
            Commands::Events { namespace, watch } => self.passthrough(
                Invocation::new(["get", "events"])
                    .namespace(NamespaceScope::or_all(self.namespace(namespace)))
                    .flag(*watch, "--watch")
                    .arg("--sort-by=.lastTimestamp"),
            ),
            Commands::Delete {
                kind,
                name,
                namespace,
                force,
            } => {
                let namespace = if kind.is_namespaced() {
                    self.namespace(namespace)
                } else {
                    None
                };
                self.handle_delete(kind.as_kubectl(), name, namespace, *force)
            }
            Commands::Debug {
                pod,
                namespace,
                image,
                container,
                fast,
            } => {
                let request = DebugRequest {
                    pod: pod.clone(),
                    namespace: self.namespace(namespace),
                    image: image.clone(),
                    container: container.clone(),
                    fast: *fast,
                };
                self.handle_debug(&request)
            }
            Commands::Check {
                command: CheckCommands::Errors { namespace },
            } => {
                let scope = NamespaceScope::or_all(self.namespace(namespace));
                eprintln!("Checking for pods that are not Running or Completed...");
                Ok(format_problem_pods(&views::fetch_problem_pods(
                    &self.kubectl,
                    scope,
                )?))
            }
            Commands::Rollout { command } => self.handle_rollout(command),
            Commands::Top { command } => match command {
                TopCommands::Pods { namespace } => self.passthrough(
                    Invocation::new(["top", "pods"])
                        .namespace(NamespaceScope::or_all(self.namespace(namespace))),
                ),
                TopCommands::Nodes { node } => self.passthrough(
                    Invocation::new(["top", "nodes"]).args(node.iter().map(String::as_str)),
                ),
            },
            Commands::Execute {
                pod,
                namespace,
                container,
                command,
            } => self.passthrough(actions::exec_invocation(
                pod,
                self.namespace(namespace),
                container.as_deref(),
                command,
            )),
            Commands::Attach {
                pod,
                namespace,
                container,
            } => {
                let target = ShellTarget {
                    pod: pod.clone(),
                    namespace: self.namespace(namespace),
                    container: container.clone(),
                };
                actions::attach_shell(&self.kubectl, &target)?;
                Ok(String::new())
            }
            Commands::PortForward {
                pod,
                mapping,
                namespace,
            } => {
                actions::ensure_port_free(mapping.local)?;
                eprintln!(
                    "Forwarding from 127.0.0.1:{} -> {}:{}\nPress Ctrl+C to stop port forwarding\n",
                    mapping.local, pod, mapping.remote
                );
                self.passthrough(actions::forward_invocation(
                    pod,
                    self.namespace(namespace),
                    *mapping,
                ))
            }
            Commands::Edit {
                kind,
                name,
                namespace,
                output,
                backup_dir,
                no_backup,
                editor,
            } => {
                let namespace = if kind.is_namespaced() {
                    Some(self.required_namespace(namespace)?)
                } else {
                    None
                };
                let request = EditRequest {
                    kind: kind.as_kubectl().to_string(),
                    name: name.clone(),
                    namespace,
                    format: *output,
                    editor: editor.clone(),
                };
                let backup_dir = match backup_dir {
                    Some(dir) => dir.clone(),
                    None => self.store.layout().backups_dir(),
                };
                self.handle_edit(&request, (!*no_backup).then_some(backup_dir.as_path()))
            }
            Commands::Apply {
                filename,
                kustomize,
                namespace,
                recursive,
                dry_run,
                validate,
                force,
                output,
            } => {
                let source = match filename {
                    Some(path) => ApplySource::File {
                        path: path.clone(),
                        recursive: *recursive,
                    },
                    None => ApplySource::Kustomize(kustomize.clone()),
                };
                let request = ApplyRequest {
                    source,
                    namespace: self.namespace(namespace),
                    dry_run: *dry_run,
                    validate: *validate,
                    force: *force,
                    output: output.clone(),
                };
                let (invocation, warning) = request.invocation()?;
                if let Some(warning) = warning {
                    eprintln!("Warning: {}", warning);
                }
                let output = self.kubectl.capture(invocation)?;
                Ok(output.trim_end().to_string())
            }
            Commands::Dig {
                pod,
                namespace,
                container,
                query,
            } => self.passthrough(actions::dig_invocation(
                pod,
                self.namespace(namespace),
                container.as_deref(),
                query,
            )),
            Commands::Version { detailed } => Ok(self.handle_version(*detailed)),
            Commands::Completion { shell } => registration_script(*shell, "kcsi"),
            Commands::Complete {
                kind,
                prefix,
                namespace,
                pod,
            } => self.handle_complete(*kind, prefix, namespace, pod),
        }
    }

    /// Explicit `-n`, else the current context's default namespace.
    fn namespace(&self, explicit: &Option<String>) -> Option<String> {
        resolve_namespace(explicit.as_deref(), &self.store)
    }

    /// Like [`Self::namespace`], but commands that act on one named object
    /// inside a namespace refuse to guess.
    fn required_namespace(&self, explicit: &Option<String>) -> Result<String, ApiError> {
        self.namespace(explicit).ok_or_else(|| {
            ApiError::InvalidArgument(
                "namespace is required (use -n, or 'kcsi context set-namespace')".to_string(),
            )
        })
    }

    /// Run kubectl attached to the terminal; its output is the command output.
    fn passthrough(&self, invocation: Invocation) -> Result<String, ApiError> {
        self.kubectl.interactive(invocation)?;
        Ok(String::new())
    }

    fn handle_context_command(&self, command: &ContextCommands) -> Result<String, ApiError> {
        match command {
            ContextCommands::Add {
                name,
                kubeconfig,
                description,
            } => {
                let path = dunce::canonicalize(kubeconfig)
                    .map_err(|_| StoreError::SourceFileNotFound(absolute(kubeconfig)))?;
                let context = self.store.add_context(name, &path, description)?;
                Ok(format_context_added(&context))
            }
            ContextCommands::Import {
                name,
                kubeconfig,
                description,
            } => {
                let source =
                    dunce::canonicalize(kubeconfig).unwrap_or_else(|_| absolute(kubeconfig));
                let context = self.store.import_context(name, &source, description)?;
                Ok(format_context_imported(&context, &source))
            }
            ContextCommands::List => {
                let contexts = self.store.list_contexts()?;
                let current = self.store.current_context_name()?;
                Ok(format_context_list(&contexts, &current))
            }
            ContextCommands::Use { name } => {
                self.store.set_current_context(name)?;
                let context = self.store.get_context(name)?;
                Ok(format_context_switched(&context))
            }
            ContextCommands::Current => match self.store.current_context() {
                Ok(context) => Ok(format_current_context(&context)),
                Err(StoreError::NoCurrentContext) => Ok(format_no_current_context()),
                Err(e) => Err(e.into()),
            },
            ContextCommands::Remove { name } => {
                let was_current = self.store.current_context_name()? == *name;
                let context = self.store.remove_context(name)?;
                Ok(format_context_removed(&context, was_current))
            }
            ContextCommands::SetNamespace { namespace } => {
                if namespace.trim().is_empty() {
                    return Err(ApiError::InvalidArgument(
                        "namespace cannot be empty; use 'kcsi context clear-namespace' instead"
                            .to_string(),
                    ));
                }
                let context = self.store.current_context()?;
                self.store.set_default_namespace(&context.name, namespace)?;
                Ok(format_namespace_set(&context.name, namespace))
            }
            ContextCommands::ClearNamespace => {
                let context = self.store.current_context()?;
                self.store.clear_default_namespace(&context.name)?;
                Ok(format_namespace_cleared(&context.name))
            }
            ContextCommands::GetNamespace => match self.store.current_context() {
                Ok(context) => Ok(format_default_namespace(&context)),
                Err(StoreError::NoCurrentContext) => Ok(format_no_current_context()),
                Err(e) => Err(e.into()),
            },
        }
    }

    fn handle_get_command(&self, command: &GetCommands) -> Result<String, ApiError> {
        match command {
            GetCommands::Pvc {
                view: Some(PvcView::Pods(args)),
                ..
            } => {
                let scope = self.view_scope(args);
                match &args.output {
                    Some(format) => self.pvc_passthrough(scope, format),
                    None => Ok(format_claim_usage(&views::fetch_claim_usage(
                        &self.kubectl,
                        scope,
                    )?)),
                }
            }
            GetCommands::Pvc {
                view: Some(PvcView::Unbound(args)),
                ..
            } => {
                let scope = self.view_scope(args);
                match &args.output {
                    Some(format) => self.pvc_passthrough(scope, format),
                    None => Ok(format_unbound_claims(&views::fetch_unbound_claims(
                        &self.kubectl,
                        scope,
                        chrono::Utc::now(),
                    )?)),
                }
            }
            GetCommands::Secrets {
                view: Some(view), ..
            } => self.handle_secret_view(view),
            GetCommands::InternalDomains { namespace } => {
                let scope = NamespaceScope::or_all(self.namespace(namespace));
                let rows = views::fetch_internal_domains(
                    &self.kubectl,
                    scope,
                    &self.config.dns.cluster_domain,
                )?;
                Ok(format_internal_domains(&rows))
            }
            listing => match listing.listing() {
                Some((resource, args)) => self.handle_listing(resource, args),
                None => Err(ApiError::InvalidArgument("unsupported get command".to_string())),
            },
        }
    }

    fn handle_secret_view(&self, view: &SecretView) -> Result<String, ApiError> {
        match view {
            SecretView::Decoded(args) => {
                let namespace = self.namespace(&args.namespace);
                let secret = views::fetch_secret(&self.kubectl, &args.name, namespace)?;
                Ok(format_decoded_secret(&views::decode_secret(&secret)?))
            }
            SecretView::Show { secret, key } => {
                let fetched = views::fetch_secret(
                    &self.kubectl,
                    &secret.name,
                    self.namespace(&secret.namespace),
                )?;
                let value = views::secret_value(&fetched, key)?;
                eprintln!("{}", SECRET_SHOW_WARNING);
                Ok(value)
            }
        }
    }

    fn handle_rollout(&self, command: &RolloutCommands) -> Result<String, ApiError> {
        let (action, target, revision) = match command {
            RolloutCommands::Restart(target) => ("restart", target, 0),
            RolloutCommands::Status(target) => ("status", target, 0),
            RolloutCommands::History(target) => ("history", target, 0),
            RolloutCommands::Undo {
                target,
                to_revision,
            } => ("undo", target, *to_revision),
        };
        let namespace = self.namespace(&target.namespace);
        self.passthrough(rollout_invocation(action, target, namespace, revision))
    }

    fn handle_edit(
        &self,
        request: &EditRequest,
        backup_dir: Option<&Path>,
    ) -> Result<String, ApiError> {
        let backup = match backup_dir {
            Some(dir) => {
                let path =
                    actions::write_backup(&self.kubectl, request, dir, chrono::Local::now())?;
                eprintln!("{}\n", success(format!("Backup saved to: {}", path.display())));
                Some(path)
            }
            None => None,
        };
        match &request.namespace {
            Some(ns) => eprintln!(
                "Opening editor for {}/{} in namespace {}...\n",
                request.kind, request.name, ns
            ),
            None => eprintln!("Opening editor for {}/{}...\n", request.kind, request.name),
        }
        if let Err(e) = self.kubectl.interactive(request.invocation()) {
            if let Some(path) = &backup {
                eprintln!("Edit failed. You can restore from backup: {}", path.display());
            }
            return Err(e);
        }
        let mut out = success("Resource updated successfully");
        if let Some(path) = &backup {
            out.push_str(&format!("\nPrevious state backed up at: {}", path.display()));
        }
        Ok(out)
    }

    fn handle_listing(&self, resource: &str, args: &ListArgs) -> Result<String, ApiError> {
        let scope = if is_cluster_scoped(resource) {
            NamespaceScope::Unset
        } else if args.all_namespaces {
            NamespaceScope::All
        } else {
            NamespaceScope::or_default(self.namespace(&args.namespace))
        };
        let mut invocation = Invocation::new(["get", resource]).namespace(scope);
        if let Some(format) = &args.output {
            invocation = invocation.args(["-o", format.as_str()]);
        }
        self.passthrough(invocation)
    }

    fn view_scope(&self, args: &ViewArgs) -> NamespaceScope {
        NamespaceScope::or_all(self.namespace(&args.namespace))
    }

    fn pvc_passthrough(&self, scope: NamespaceScope, format: &str) -> Result<String, ApiError> {
        self.passthrough(
            Invocation::new(["get", "pvc"])
                .namespace(scope)
                .args(["-o", format]),
        )
    }

    fn handle_delete(
        &self,
        kind: &str,
        name: &str,
        namespace: Option<String>,
        force: bool,
    ) -> Result<String, ApiError> {
        if name.is_empty() {
            return Err(ApiError::InvalidArgument(
                "resource name is required".to_string(),
            ));
        }
        if !force {
            let prompt = delete_prompt(kind, name, namespace.as_deref());
            if !self.confirmer.confirm(&prompt)? {
                return Ok("Delete cancelled.".to_string());
            }
        }

        eprintln!("Deleting {} '{}'...", kind, name);
        info!(kind, name, namespace = ?namespace, force, "Deleting resource");
        self.passthrough(
            Invocation::new(["delete", kind, name]).namespace(NamespaceScope::or_default(namespace)),
        )
    }

    fn handle_debug(&self, request: &DebugRequest) -> Result<String, ApiError> {
        let plan = views::plan_debug(&self.kubectl, &self.config.debug, request)?;
        eprintln!("{}\n", format_debug_banner(&plan, &self.config.debug));
        self.passthrough(plan.invocation())
    }

    fn handle_version(&self, detailed: bool) -> String {
        if !detailed {
            return version::version_info();
        }
        match self.kubectl.client_version() {
            Ok(client) => version::detailed_version(Ok(&client)),
            Err(e) => version::detailed_version(Err(&e.to_string())),
        }
    }

    fn handle_complete(
        &self,
        kind: CompletionKind,
        prefix: &Option<String>,
        namespace: &Option<String>,
        pod: &Option<String>,
    ) -> Result<String, ApiError> {
        let request = CompletionRequest {
            prefix: prefix.clone().unwrap_or_default(),
            namespace: self.namespace(namespace),
            pod: pod.clone(),
        };
        let names = CompletionSource::new(&self.kubectl, &self.store).candidates(kind, &request)?;
        Ok(names.join("\n"))
    }
}

/// `kubectl rollout <action> <kind> <name> [-n ns] [--to-revision=N]`; revision 0 means none.
fn rollout_invocation(
    action: &str,
    target: &RolloutTarget,
    namespace: Option<String>,
    revision: u32,
) -> Invocation {
    Invocation::new(["rollout", action, target.kind.as_kubectl(), target.name.as_str()])
        .namespace(NamespaceScope::or_default(namespace))
        .flag(revision > 0, format!("--to-revision={}", revision))
}

fn is_cluster_scoped(resource: &str) -> bool {
    matches!(resource, "nodes" | "namespaces")
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
