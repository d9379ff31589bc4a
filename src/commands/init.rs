//! The `init` command: write a starter config file.

use crate::cli::OutputManager;
use crate::config::{AppConfig, CONFIG_FILE_NAME};
use crate::context::ExecutionContext;
use crate::error::{HookError, Result};
use crate::grammar::{FlagOptions, Pattern, Registry};
use crate::pipeline::{Command, HookResult};
use anyhow::anyhow;
use std::path::Path;

/// Write a starter `.relkit.toml` into the working directory
pub struct InitCommand {
    registry: Registry,
    output: OutputManager,
}

impl InitCommand {
    /// Wire the command's grammar
    pub fn new(output: OutputManager) -> Result<Self> {
        let mut registry = Registry::new(Pattern::compile("<init>")?);
        registry.register_flag(
            "force|f",
            FlagOptions::default().description("overwrite an existing config file"),
        )?;
        Ok(Self { registry, output })
    }
}

impl Command for InitCommand {
    fn registry(&self) -> &Registry {
        &self.registry
    }

    async fn main(&self, ctx: ExecutionContext) -> HookResult {
        let path = Path::new(CONFIG_FILE_NAME);
        if path.exists() && !ctx.flag("force") {
            return Err(HookError::recoverable(anyhow!(
                "{} already exists, pass --force to overwrite",
                path.display()
            )));
        }
        std::fs::write(path, AppConfig::starter_template()).map_err(HookError::fatal)?;
        self.output
            .success(&format!("wrote {}", path.display()));
        Ok(ctx)
    }
}
