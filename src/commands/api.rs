//! Release creation against the GitHub and GitLab REST APIs.

use anyhow::{Context, bail};
use serde_json::json;

/// Default GitHub API base URL
const GITHUB_API: &str = "https://api.github.com";
/// Default GitLab API base URL
const GITLAB_API: &str = "https://gitlab.com/api/v4";

/// Everything needed to create one release
#[derive(Debug)]
pub struct ReleaseRequest<'a> {
    /// `github` or `gitlab`
    pub platform: &'a str,
    /// API base URL override from config
    pub api_base: Option<&'a str>,
    /// Repository slug, `owner/name`
    pub repository: &'a str,
    /// API token
    pub token: &'a str,
    /// Tag name, e.g. `v1.2.3`
    pub tag: &'a str,
    /// Branch or commit the tag points at
    pub target: &'a str,
    /// Release notes body
    pub notes: &'a str,
    /// Whether to mark the release as a prerelease (GitHub only)
    pub prerelease: bool,
}

/// HTTP client for the release endpoints
#[derive(Debug, Clone)]
pub struct ReleaseClient {
    http: reqwest::Client,
}

impl ReleaseClient {
    /// Build a client with the tool's user agent
    pub fn new() -> crate::error::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("relkit/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    /// Create a release, returning its browser URL
    pub async fn create_release(&self, req: &ReleaseRequest<'_>) -> anyhow::Result<String> {
        match req.platform {
            "github" => self.create_github_release(req).await,
            "gitlab" => self.create_gitlab_release(req).await,
            other => bail!("no release API for platform '{other}'"),
        }
    }

    async fn create_github_release(&self, req: &ReleaseRequest<'_>) -> anyhow::Result<String> {
        let base = req.api_base.unwrap_or(GITHUB_API);
        let url = format!("{}/repos/{}/releases", base.trim_end_matches('/'), req.repository);

        let response = self
            .http
            .post(&url)
            .bearer_auth(req.token)
            .header("Accept", "application/vnd.github+json")
            .json(&json!({
                "tag_name": req.tag,
                "target_commitish": req.target,
                "name": format!("Release {}", req.tag),
                "body": req.notes,
                "draft": false,
                "prerelease": req.prerelease,
            }))
            .send()
            .await
            .context("GitHub release request failed")?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .context("GitHub returned a non-JSON response")?;
        if !status.is_success() {
            bail!(
                "GitHub refused the release ({}): {}",
                status,
                body["message"].as_str().unwrap_or("no error message")
            );
        }
        body["html_url"]
            .as_str()
            .map(str::to_string)
            .context("GitHub response had no html_url")
    }

    async fn create_gitlab_release(&self, req: &ReleaseRequest<'_>) -> anyhow::Result<String> {
        let base = req.api_base.unwrap_or(GITLAB_API);
        let url = format!(
            "{}/projects/{}/releases",
            base.trim_end_matches('/'),
            project_path(req.repository)
        );

        let response = self
            .http
            .post(&url)
            .header("PRIVATE-TOKEN", req.token)
            .json(&json!({
                "tag_name": req.tag,
                "ref": req.target,
                "name": format!("Release {}", req.tag),
                "description": req.notes,
            }))
            .send()
            .await
            .context("GitLab release request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("GitLab refused the release ({status}): {body}");
        }
        Ok(format!(
            "https://gitlab.com/{}/-/releases/{}",
            req.repository, req.tag
        ))
    }
}

/// GitLab wants the project path URL-encoded as a single segment
fn project_path(repository: &str) -> String {
    repository.replace('/', "%2F")
}
