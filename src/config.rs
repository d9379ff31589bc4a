//! External configuration.
//!
//! Configuration is optional: a missing file yields defaults, while a file
//! that exists but does not parse is a fatal configuration error. Lookup
//! order is `.relkit.toml` in the working directory, then the same file in
//! the home directory. Tokens are never stored in the file; they come from
//! the command line or the environment.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name searched for in cwd and the home directory
pub const CONFIG_FILE_NAME: &str = ".relkit.toml";

/// External configuration record, opaque to the grammar engine
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Default release platform (`github` or `gitlab`)
    #[serde(default)]
    pub platform: Option<String>,
    /// Repository slug, `owner/name`
    #[serde(default)]
    pub repository: Option<String>,
    /// Default branch to release from
    #[serde(default)]
    pub branch: Option<String>,
    /// GitHub API base URL override (for GitHub Enterprise)
    #[serde(default)]
    pub github_api: Option<String>,
    /// GitLab API base URL override (for self-hosted GitLab)
    #[serde(default)]
    pub gitlab_api: Option<String>,
}

impl AppConfig {
    /// Load configuration from the standard search path.
    ///
    /// Absence is not an error; a present but unparseable file is.
    pub fn load() -> Result<Self> {
        for path in Self::search_paths() {
            if path.is_file() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = toml::from_str(&text).map_err(|e| ConfigError::InvalidConfigFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Candidate config file locations, highest priority first
    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(CONFIG_FILE_NAME));
        }
        paths
    }

    /// Resolve an API token for a platform from the environment.
    ///
    /// `RELKIT_TOKEN` wins, then the platform's conventional variable
    /// (`GITHUB_TOKEN` / `GITLAB_TOKEN`).
    pub fn token_from_env(platform: &str) -> Option<String> {
        let platform_var = match platform {
            "github" => "GITHUB_TOKEN",
            "gitlab" => "GITLAB_TOKEN",
            _ => return std::env::var("RELKIT_TOKEN").ok(),
        };
        std::env::var("RELKIT_TOKEN")
            .or_else(|_| std::env::var(platform_var))
            .ok()
    }

    /// Starter config written by `relkit init`
    pub fn starter_template() -> &'static str {
        r#"# relkit configuration
# platform = "github"
# repository = "owner/name"
# branch = "main"
# github_api = "https://api.github.com"
# gitlab_api = "https://gitlab.com/api/v4"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_a_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "platform = \"github\"\nrepository = \"acme/widget\"\nbranch = \"main\""
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.platform.as_deref(), Some("github"));
        assert_eq!(config.repository.as_deref(), Some("acme/widget"));
        assert_eq!(config.branch.as_deref(), Some("main"));
        assert!(config.github_api.is_none());
    }

    #[test]
    fn broken_config_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "platform = [this is not toml").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::RelkitError::Config(ConfigError::InvalidConfigFile { .. })
        ));
    }

    #[test]
    fn starter_template_is_valid_toml() {
        let parsed: std::result::Result<AppConfig, _> =
            toml::from_str(AppConfig::starter_template());
        assert!(parsed.is_ok());
    }
}
