//! kcsi CLI Binary
//!
//! kubectl wrapper with a named-context registry, confirmations and diagnostic views.

use clap::{CommandFactory, Parser};
use clap_complete::env::CompleteEnv;
use kcsi::cli::{Cli, RunContext};
use kcsi::config::ConfigLoader;
use kcsi::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    // Answers and exits when a shell asks for completions (COMPLETE=<shell>)
    CompleteEnv::with_factory(Cli::command).complete();

    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!(command = %kcsi::cli::command_name(&cli.command), "kcsi starting");

    let context = match RunContext::new(cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing kcsi: {}", e);
            eprintln!("{}", kcsi::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", kcsi::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    // Logging stays off unless asked for, so stdout and stderr carry only command output
    if !cli.verbose && cli.log_level.is_none() {
        return LoggingConfig::off();
    }

    let loaded = match cli.config {
        Some(ref config_path) => ConfigLoader::load_from_file(config_path),
        None => ConfigLoader::load(),
    };
    let mut config = loaded.map(|c| c.logging).unwrap_or_default();

    // Override with CLI arguments (highest priority)
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    } else if config.level == "off" {
        config.level = "info".to_string();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.output = "file".to_string();
        config.file = Some(file.clone());
    }

    config
}
