//! The three-stage execution pipeline.
//!
//! Every invocation moves through `Parsing → Before → Main → After →
//! Complete`. Parsing runs the grammar engine; the remaining stages are the
//! command's hooks, awaited one after another with the context threaded
//! through. Any failure stops the pipeline: parse errors and fatal hook
//! errors abort the run, while a recoverable hook error ends it in the
//! explicit [`PipelineOutcome::Halted`] terminal state.

use crate::context::ExecutionContext;
use crate::error::{HookError, Result};
use crate::grammar::{Registry, extract};
use std::fmt;

/// Result type for command hooks
pub type HookResult = std::result::Result<ExecutionContext, HookError>;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Token extraction against the registry
    Parsing,
    /// Pre-execution hook
    Before,
    /// Main hook
    Main,
    /// Post-execution hook
    After,
    /// All stages finished
    Complete,
    /// A stage failed and the run stopped
    Aborted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Parsing => "parsing",
            Stage::Before => "before",
            Stage::Main => "main",
            Stage::After => "after",
            Stage::Complete => "complete",
            Stage::Aborted => "aborted",
        };
        write!(f, "{name}")
    }
}

/// How a pipeline run ended, short of a fatal error
#[derive(Debug)]
pub enum PipelineOutcome {
    /// All stages resolved; the final context is returned
    Complete(ExecutionContext),
    /// A hook raised a recoverable error; later stages did not run.
    ///
    /// This is a deliberate terminal state: the run is over, the error has
    /// been recorded, and the process still exits cleanly once it is
    /// reported.
    Halted {
        /// Stage that raised the error
        stage: Stage,
        /// The recoverable error
        error: HookError,
    },
}

/// A command: a populated registry plus up to three async hooks.
///
/// The default `before` and `after` are identity passes. The default `main`
/// is also an identity pass but warns, since a command that does nothing in
/// `main` is almost certainly missing an override.
pub trait Command {
    /// Registry built once at command construction
    fn registry(&self) -> &Registry;

    /// Pre-execution hook
    fn before(&self, ctx: ExecutionContext) -> impl Future<Output = HookResult> + Send {
        async { Ok(ctx) }
    }

    /// Main hook
    fn main(&self, ctx: ExecutionContext) -> impl Future<Output = HookResult> + Send {
        async {
            log::warn!(
                "command '{}' does not override its main hook",
                ctx.command_name
            );
            Ok(ctx)
        }
    }

    /// Post-execution hook
    fn after(&self, ctx: ExecutionContext) -> impl Future<Output = HookResult> + Send {
        async { Ok(ctx) }
    }
}

/// Run one invocation of a command over a fresh context.
///
/// A parse failure aborts before any hook runs and is always fatal. A fatal
/// hook error propagates as `Err`; a recoverable one ends the run as
/// [`PipelineOutcome::Halted`].
pub async fn run_pipeline<C: Command>(
    command: &C,
    mut ctx: ExecutionContext,
) -> Result<PipelineOutcome> {
    let extraction = extract(&ctx.raw_tokens, command.registry())?;
    ctx.absorb(extraction);
    log::debug!("parsed invocation of '{}'", ctx.command_name);

    ctx = match command.before(ctx).await {
        Ok(ctx) => ctx,
        Err(error) => return settle(Stage::Before, error),
    };
    ctx = match command.main(ctx).await {
        Ok(ctx) => ctx,
        Err(error) => return settle(Stage::Main, error),
    };
    ctx = match command.after(ctx).await {
        Ok(ctx) => ctx,
        Err(error) => return settle(Stage::After, error),
    };

    Ok(PipelineOutcome::Complete(ctx))
}

fn settle(stage: Stage, error: HookError) -> Result<PipelineOutcome> {
    if error.is_fatal() {
        log::error!("fatal error in {stage} hook");
        Err(error.into())
    } else {
        Ok(PipelineOutcome::Halted { stage, error })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::grammar::{ArgOptions, Pattern, Registry};
    use anyhow::anyhow;
    use std::sync::Mutex;

    /// Records stage execution order and fails where told to
    struct ProbeCommand {
        registry: Registry,
        calls: Mutex<Vec<&'static str>>,
        fail_in: Option<(&'static str, bool)>,
    }

    impl ProbeCommand {
        fn new(fail_in: Option<(&'static str, bool)>) -> Self {
            Self {
                registry: Registry::new(Pattern::compile("<probe>").unwrap()),
                calls: Mutex::new(Vec::new()),
                fail_in,
            }
        }

        fn maybe_fail(&self, stage: &'static str, ctx: ExecutionContext) -> HookResult {
            self.calls.lock().unwrap().push(stage);
            match self.fail_in {
                Some((failing, fatal)) if failing == stage => {
                    let err = anyhow!("{stage} exploded");
                    Err(if fatal {
                        HookError::fatal(err)
                    } else {
                        HookError::recoverable(err)
                    })
                }
                _ => Ok(ctx),
            }
        }
    }

    impl Command for ProbeCommand {
        fn registry(&self) -> &Registry {
            &self.registry
        }

        async fn before(&self, mut ctx: ExecutionContext) -> HookResult {
            ctx.set_scratch("seen-before", serde_json::json!(true));
            self.maybe_fail("before", ctx)
        }

        async fn main(&self, mut ctx: ExecutionContext) -> HookResult {
            ctx.set_scratch("seen-main", serde_json::json!(true));
            self.maybe_fail("main", ctx)
        }

        async fn after(&self, ctx: ExecutionContext) -> HookResult {
            self.maybe_fail("after", ctx)
        }
    }

    fn ctx(tokens: &[&str]) -> ExecutionContext {
        ExecutionContext::new(
            "probe",
            tokens.iter().map(|t| t.to_string()).collect(),
            AppConfig::default(),
        )
    }

    #[tokio::test]
    async fn stages_run_in_order_and_thread_the_context() {
        let command = ProbeCommand::new(None);
        let outcome = run_pipeline(&command, ctx(&[])).await.unwrap();

        let PipelineOutcome::Complete(final_ctx) = outcome else {
            panic!("expected completion");
        };
        assert_eq!(
            *command.calls.lock().unwrap(),
            vec!["before", "main", "after"]
        );
        assert_eq!(final_ctx.scratch("seen-before"), Some(&serde_json::json!(true)));
        assert_eq!(final_ctx.scratch("seen-main"), Some(&serde_json::json!(true)));
    }

    #[tokio::test]
    async fn fatal_before_skips_main_and_after() {
        let command = ProbeCommand::new(Some(("before", true)));
        let result = run_pipeline(&command, ctx(&[])).await;

        assert!(result.is_err());
        assert_eq!(*command.calls.lock().unwrap(), vec!["before"]);
    }

    #[tokio::test]
    async fn recoverable_main_halts_without_running_after() {
        let command = ProbeCommand::new(Some(("main", false)));
        let outcome = run_pipeline(&command, ctx(&[])).await.unwrap();

        let PipelineOutcome::Halted { stage, error } = outcome else {
            panic!("expected halt");
        };
        assert_eq!(stage, Stage::Main);
        assert!(!error.is_fatal());
        assert_eq!(*command.calls.lock().unwrap(), vec!["before", "main"]);
    }

    #[tokio::test]
    async fn parse_failure_aborts_before_any_hook() {
        let mut registry = Registry::new(Pattern::compile("<probe>").unwrap());
        registry
            .register_argument("token|t", ArgOptions::default())
            .unwrap();
        let command = ProbeCommand {
            registry,
            calls: Mutex::new(Vec::new()),
            fail_in: None,
        };

        // --token with no value is a parse error
        let result = run_pipeline(&command, ctx(&["--token"])).await;
        assert!(result.is_err());
        assert!(command.calls.lock().unwrap().is_empty());
    }
}
