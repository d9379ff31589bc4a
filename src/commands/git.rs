//! Shelling out to the git binary.
//!
//! Release operations go through the system `git` rather than an in-process
//! implementation: the tool tags whatever repository it runs in, and the
//! user's git configuration (signing, credential helpers, hooks) must apply.

use anyhow::{Context, bail};
use std::path::PathBuf;
use tokio::process::Command;

/// Thin wrapper around the located git binary
#[derive(Debug, Clone)]
pub struct GitRunner {
    git: PathBuf,
}

impl GitRunner {
    /// Locate git on PATH
    pub fn locate() -> anyhow::Result<Self> {
        let git = which::which("git").context("git binary not found on PATH")?;
        Ok(Self { git })
    }

    /// Run a git subcommand, returning trimmed stdout
    pub async fn run(&self, args: &[&str]) -> anyhow::Result<String> {
        log::debug!("running git {}", args.join(" "));
        let output = Command::new(&self.git)
            .args(args)
            .output()
            .await
            .with_context(|| format!("failed to spawn git {}", args.join(" ")))?;
        if !output.status.success() {
            bail!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Most recent reachable tag, if the repository has one
    pub async fn latest_tag(&self) -> Option<String> {
        self.run(&["describe", "--tags", "--abbrev=0"]).await.ok()
    }

    /// Create an annotated tag
    pub async fn create_tag(&self, tag: &str, message: &str) -> anyhow::Result<()> {
        self.run(&["tag", "-a", tag, "-m", message]).await?;
        Ok(())
    }

    /// Push a tag to origin
    pub async fn push_tag(&self, tag: &str) -> anyhow::Result<()> {
        self.run(&["push", "origin", tag]).await?;
        Ok(())
    }
}
