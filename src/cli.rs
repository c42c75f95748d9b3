//! CLI domain: parse, route, help, output, prompts and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod help;
mod output;
mod parse;
mod presentation;
mod prompt;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{
    CheckCommands, Cli, Commands, ContextCommands, GetCommands, ListArgs, PvcView, ResourceKind,
    RolloutCommands, RolloutKind, RolloutTarget, SecretArgs, SecretView, TopCommands, ViewArgs,
};
pub use prompt::{delete_prompt, Confirmer, FixedAnswer, TerminalConfirmer};
pub use route::RunContext;
