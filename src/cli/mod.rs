//! Command line interface for relkit.
//!
//! The invocation shape is `relkit <command> [tokens...]`: the first argument
//! selects a command, the rest is the raw token stream handed to that
//! command's pipeline. Grammar and dispatch errors bubble up to `main`;
//! recoverable hook halts are reported here and exit cleanly.

mod output;

pub use output::OutputManager;

use crate::commands::{InitCommand, ReleaseCommand};
use crate::config::AppConfig;
use crate::context::ExecutionContext;
use crate::error::{CliError, Result};
use crate::pipeline::{PipelineOutcome, run_pipeline};

/// Names of the commands this binary ships
pub const COMMAND_NAMES: &[&str] = &["release", "init"];

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    run_with(std::env::args().collect()).await
}

/// Run with an explicit argument vector (`args[0]` is the binary path)
pub async fn run_with(args: Vec<String>) -> Result<i32> {
    let output = OutputManager::new(false);

    let Some(command_name) = args.get(1).cloned() else {
        print_usage(&output);
        return Err(CliError::MissingCommand.into());
    };

    let config = AppConfig::load()?;
    let tokens = args.get(2..).unwrap_or_default().to_vec();
    let ctx = ExecutionContext::new(command_name.clone(), tokens, config);

    let outcome = match command_name.as_str() {
        "release" => run_pipeline(&ReleaseCommand::new(output.clone())?, ctx).await?,
        "init" => run_pipeline(&InitCommand::new(output.clone())?, ctx).await?,
        _ => {
            return Err(CliError::UnknownCommand {
                name: command_name,
                known: COMMAND_NAMES.iter().map(|n| n.to_string()).collect(),
            }
            .into());
        }
    };

    match outcome {
        PipelineOutcome::Complete(_) => Ok(0),
        PipelineOutcome::Halted { stage, error } => {
            output.warn(&format!("command stopped in its {stage} hook: {error}"));
            Ok(0)
        }
    }
}

fn print_usage(output: &OutputManager) {
    output.println("Usage: relkit <command> [arguments]");
    output.println("");
    output.println("Commands:");
    output.indent("release <platform> [branch]   tag and publish a release");
    output.indent("init                          write a starter .relkit.toml");
}
