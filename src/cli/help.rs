//! CLI command-name contract for logging.

use crate::cli::parse::{
    CheckCommands, Commands, ContextCommands, GetCommands, PvcView, RolloutCommands, SecretView,
    TopCommands,
};

/// Dotted command name (e.g. "context.use", "get.pvc.unbound").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Context { command } => format!("context.{}", context_command_name(command)),
        Commands::Get { command } => format!("get.{}", get_command_name(command)),
        Commands::Describe { .. } => "describe".to_string(),
        Commands::Logs { .. } => "logs".to_string(),
        Commands::Events { .. } => "events".to_string(),
        Commands::Delete { .. } => "delete".to_string(),
        Commands::Debug { .. } => "debug".to_string(),
        Commands::Check { command } => match command {
            CheckCommands::Errors { .. } => "check.errors".to_string(),
        },
        Commands::Rollout { command } => format!("rollout.{}", rollout_command_name(command)),
        Commands::Top { command } => match command {
            TopCommands::Pods { .. } => "top.pods".to_string(),
            TopCommands::Nodes { .. } => "top.nodes".to_string(),
        },
        Commands::Execute { .. } => "execute".to_string(),
        Commands::Attach { .. } => "attach".to_string(),
        Commands::PortForward { .. } => "port_forward".to_string(),
        Commands::Edit { .. } => "edit".to_string(),
        Commands::Apply { .. } => "apply".to_string(),
        Commands::Dig { .. } => "dig".to_string(),
        Commands::Version { .. } => "version".to_string(),
        Commands::Completion { .. } => "completion".to_string(),
        Commands::Complete { .. } => "complete".to_string(),
    }
}

pub fn context_command_name(command: &ContextCommands) -> &'static str {
    match command {
        ContextCommands::Add { .. } => "add",
        ContextCommands::Import { .. } => "import",
        ContextCommands::List => "list",
        ContextCommands::Use { .. } => "use",
        ContextCommands::Current => "current",
        ContextCommands::Remove { .. } => "remove",
        ContextCommands::SetNamespace { .. } => "set_namespace",
        ContextCommands::ClearNamespace => "clear_namespace",
        ContextCommands::GetNamespace => "get_namespace",
    }
}

pub fn rollout_command_name(command: &RolloutCommands) -> &'static str {
    match command {
        RolloutCommands::Restart(_) => "restart",
        RolloutCommands::Status(_) => "status",
        RolloutCommands::History(_) => "history",
        RolloutCommands::Undo { .. } => "undo",
    }
}

pub fn get_command_name(command: &GetCommands) -> &'static str {
    match command {
        GetCommands::Secrets {
            view: Some(SecretView::Decoded(_)),
            ..
        } => "secrets.decoded",
        GetCommands::Secrets {
            view: Some(SecretView::Show { .. }),
            ..
        } => "secrets.show",
        GetCommands::Pvc {
            view: Some(PvcView::Pods(_)),
            ..
        } => "pvc.pods",
        GetCommands::Pvc {
            view: Some(PvcView::Unbound(_)),
            ..
        } => "pvc.unbound",
        GetCommands::InternalDomains { .. } => "internal_domains",
        other => other.listing().map(|(resource, _)| resource).unwrap_or("unknown"),
    }
}
