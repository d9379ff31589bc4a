//! The `release` command.
//!
//! Pattern: `<release> <platform> <branch?>`. The `before` hook resolves
//! platform, branch, repository, token, and bump level into scratch data;
//! `main` computes the next version from the latest tag, tags and pushes,
//! and creates the release through the platform API; `after` prints the
//! summary. With `--dry-run` the main hook narrates what it would do and
//! performs no side effects.

use crate::cli::OutputManager;
use crate::context::ExecutionContext;
use crate::error::{HookError, Result};
use crate::grammar::{ArgOptions, FlagOptions, ParamOptions, Pattern, Registry, Value};
use crate::pipeline::{Command, HookResult};
use anyhow::anyhow;
use semver::Version;

use super::api::{ReleaseClient, ReleaseRequest};
use super::git::GitRunner;

/// Bump levels accepted by `--level`
const LEVELS: [&str; 3] = ["patch", "minor", "major"];
/// Platforms with a release API
const PLATFORMS: [&str; 2] = ["github", "gitlab"];

/// Tag and publish a release on GitHub or GitLab
pub struct ReleaseCommand {
    registry: Registry,
    output: OutputManager,
    client: ReleaseClient,
}

impl ReleaseCommand {
    /// Wire the command's grammar. Fails only on a definition mistake.
    pub fn new(output: OutputManager) -> Result<Self> {
        let mut registry = Registry::new(Pattern::compile("<release> <platform> <branch?>")?);
        registry.register_parameter(
            "platform",
            ParamOptions::default().description("release platform: github or gitlab"),
        )?;
        registry.register_parameter(
            "branch",
            ParamOptions::default().description("branch to release from (default from config)"),
        )?;
        registry.register_argument(
            "token|t",
            ArgOptions::default().description("API token (default from environment)"),
        )?;
        registry.register_argument(
            "level|l",
            ArgOptions::default()
                .description("version bump level: patch, minor, or major")
                .validator(|v| matches!(v.as_str(), Some(l) if LEVELS.contains(&l))),
        )?;
        registry.register_flag(
            "dry-run|d",
            FlagOptions::default().description("print the plan without tagging or publishing"),
        )?;
        registry.register_flag(
            "no-push",
            FlagOptions::default().description("create the tag locally but do not push it"),
        )?;

        Ok(Self {
            registry,
            output,
            client: ReleaseClient::new()?,
        })
    }
}

impl Command for ReleaseCommand {
    fn registry(&self) -> &Registry {
        &self.registry
    }

    async fn before(&self, mut ctx: ExecutionContext) -> HookResult {
        let platform = ctx
            .parameter("platform")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| HookError::fatal(anyhow!("missing platform parameter")))?;
        if !PLATFORMS.contains(&platform.as_str()) {
            return Err(HookError::fatal(anyhow!(
                "unsupported platform '{platform}', expected one of: {}",
                PLATFORMS.join(", ")
            )));
        }

        let branch = ctx
            .parameter("branch")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| ctx.config.branch.clone())
            .unwrap_or_else(|| "main".to_string());

        let repository = ctx.config.repository.clone().ok_or_else(|| {
            HookError::fatal(anyhow!(
                "repository not configured; set repository = \"owner/name\" in .relkit.toml"
            ))
        })?;

        let token = ctx
            .argument("token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| crate::config::AppConfig::token_from_env(&platform));
        if token.is_none() && !ctx.flag("dry-run") {
            return Err(HookError::fatal(anyhow!(
                "no API token for {platform}; pass --token or set the environment variable"
            )));
        }

        let level = ctx
            .argument("level")
            .and_then(Value::as_str)
            .unwrap_or("patch")
            .to_string();

        self.output
            .info(&format!("releasing {repository} on {platform} from {branch}"));

        ctx.set_scratch("platform", serde_json::json!(platform));
        ctx.set_scratch("branch", serde_json::json!(branch));
        ctx.set_scratch("repository", serde_json::json!(repository));
        ctx.set_scratch("level", serde_json::json!(level));
        if let Some(token) = token {
            ctx.set_scratch("token", serde_json::json!(token));
        }
        Ok(ctx)
    }

    async fn main(&self, mut ctx: ExecutionContext) -> HookResult {
        let git = GitRunner::locate().map_err(HookError::fatal)?;
        let dry_run = ctx.flag("dry-run");
        let no_push = ctx.flag("no-push");

        let current = match git.latest_tag().await {
            Some(tag) => parse_tag_version(&tag).map_err(HookError::fatal)?,
            None => Version::new(0, 0, 0),
        };
        let level = ctx.scratch_str("level").unwrap_or("patch").to_string();
        let next = bump_version(&current, &level);
        let tag = format!("v{next}");
        self.output
            .info(&format!("current version {current}, next {next} ({level})"));

        if dry_run {
            self.output.println(&format!("would tag {tag}"));
            if !no_push {
                self.output.println(&format!("would push {tag} to origin"));
            }
            self.output.println("would create the release via the API");
            ctx.set_scratch("tag", serde_json::json!(tag));
            ctx.set_scratch("dry-run", serde_json::json!(true));
            return Ok(ctx);
        }

        git.create_tag(&tag, &format!("Release {next}"))
            .await
            .map_err(HookError::fatal)?;
        self.output.success(&format!("tagged {tag}"));
        if !no_push {
            git.push_tag(&tag).await.map_err(HookError::fatal)?;
            self.output.success(&format!("pushed {tag} to origin"));
        }

        let platform = ctx.scratch_str("platform").unwrap_or_default().to_string();
        let repository = ctx.scratch_str("repository").unwrap_or_default().to_string();
        let branch = ctx.scratch_str("branch").unwrap_or_default().to_string();
        let token = ctx
            .scratch_str("token")
            .ok_or_else(|| HookError::fatal(anyhow!("token vanished between stages")))?
            .to_string();
        let api_base = match platform.as_str() {
            "github" => ctx.config.github_api.clone(),
            _ => ctx.config.gitlab_api.clone(),
        };
        let notes = format!(
            "Release {next} of {repository}, cut from {branch} on {}.",
            chrono::Utc::now().format("%Y-%m-%d")
        );

        let request = ReleaseRequest {
            platform: &platform,
            api_base: api_base.as_deref(),
            repository: &repository,
            token: &token,
            tag: &tag,
            target: &branch,
            notes: &notes,
            prerelease: is_prerelease(&next),
        };
        // The tag is already pushed at this point: an API failure leaves a
        // usable tag behind, so it stops the pipeline without failing the
        // process.
        let url = self
            .client
            .create_release(&request)
            .await
            .map_err(HookError::recoverable)?;

        ctx.set_scratch("tag", serde_json::json!(tag));
        ctx.set_scratch("release-url", serde_json::json!(url));
        Ok(ctx)
    }

    async fn after(&self, ctx: ExecutionContext) -> HookResult {
        if ctx.scratch("dry-run").is_some() {
            self.output.info("dry run, nothing was published");
        } else if let Some(url) = ctx.scratch_str("release-url") {
            self.output.success(&format!("release published: {url}"));
        }
        Ok(ctx)
    }
}

/// Parse a `vX.Y.Z` or `X.Y.Z` tag into a version
fn parse_tag_version(tag: &str) -> anyhow::Result<Version> {
    let bare = tag.strip_prefix('v').unwrap_or(tag);
    Version::parse(bare).map_err(|e| anyhow!("latest tag '{tag}' is not a semantic version: {e}"))
}

/// Bump a version, clearing any pre-release and build metadata
fn bump_version(current: &Version, level: &str) -> Version {
    match level {
        "major" => Version::new(current.major + 1, 0, 0),
        "minor" => Version::new(current.major, current.minor + 1, 0),
        _ => Version::new(current.major, current.minor, current.patch + 1),
    }
}

/// Pre-1.0 versions and versions with pre-release tags are prereleases
fn is_prerelease(version: &Version) -> bool {
    version.major == 0 || !version.pre.is_empty()
}
