//! Run configuration for git-stories
//!
//! Loads the configuration file passed on the command line. The format is
//! chosen from the extension: `.json` (default), `.toml`, `.yaml` / `.yml`.
//!
//! # Configuration Format
//!
//! ```json
//! {
//!   "user": {
//!     "github_token": "ghp_...",
//!     "owner": "octocat",
//!     "repository": "hello-world"
//!   },
//!   "linters": [
//!     { "name": "cpplint", "parameters": ["--recursive"] }
//!   ],
//!   "output": { "path": "output.json", "format": "json" }
//! }
//! ```

use crate::models::LinterSpec;
use crate::report::ReportFormat;
use crate::vcs::Remote;
use crate::workspace::DEFAULT_WORKDIR;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable that overrides `user.github_token`
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Repository coordinates and credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub github_token: Option<String>,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub repository: String,
    /// Clone from this URL or path instead of GitHub
    #[serde(default)]
    pub url: Option<String>,
}

/// Where and how to write the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub format: ReportFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: ReportFormat::default(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("output.json")
}

fn default_workdir() -> PathBuf {
    PathBuf::from(DEFAULT_WORKDIR)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub user: UserConfig,
    #[serde(default)]
    pub linters: Vec<LinterSpec>,
    #[serde(default)]
    pub output: OutputConfig,
    /// Scratch directory the repository is cloned into
    #[serde(default = "default_workdir")]
    pub workdir: PathBuf,
}

impl Config {
    /// Load from `path`, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        let mut config = Self::parse(&content, ConfigFormat::from_path(path))
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.is_empty() {
                debug!("Using GitHub token from {}", TOKEN_ENV);
                config.user.github_token = Some(token);
            }
        }

        config.validate()?;
        debug!(linters = config.linters.len(), "Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        let config = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.user.url.is_none() && (self.user.owner.is_empty() || self.user.repository.is_empty()) {
            bail!("Config must set user.owner and user.repository, or user.url");
        }
        Ok(())
    }

    /// Clone source, with credentials when a token is configured
    pub fn remote(&self) -> Remote {
        let remote = match &self.user.url {
            Some(url) => Remote {
                url: url.clone(),
                credentials: None,
            },
            None => Remote::github(&self.user.owner, &self.user.repository),
        };
        match self.user.github_token.as_deref() {
            Some(token) if !token.is_empty() => remote.with_credentials(&self.user.owner, token),
            _ => remote,
        }
    }

    /// Directory name of the clone inside the scratch directory
    pub fn clone_dir_name(&self) -> String {
        if !self.user.repository.is_empty() {
            return self.user.repository.clone();
        }
        self.user
            .url
            .as_deref()
            .map(|url| url.trim_end_matches('/').trim_end_matches(".git"))
            .and_then(|url| url.rsplit(['/', '\\']).next())
            .filter(|name| !name.is_empty())
            .unwrap_or("repository")
            .to_string()
    }
}

/// Config file encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => ConfigFormat::Toml,
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"{
        "user": {"github_token": "t0k", "owner": "octo", "repository": "demo"},
        "linters": [{"name": "cpplint", "parameters": ["--quiet"]}]
    }"#;

    #[test]
    fn test_json_parsing() {
        let config = Config::parse(JSON, ConfigFormat::Json).unwrap();
        assert_eq!(config.user.owner, "octo");
        assert_eq!(config.linters, vec![LinterSpec::new("cpplint", vec!["--quiet".into()])]);
        assert_eq!(config.output.path, PathBuf::from("output.json"));
        assert_eq!(config.output.format, ReportFormat::Json);
        assert_eq!(config.workdir, PathBuf::from("Temp"));
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
workdir = "/tmp/stories"

[user]
owner = "octo"
repository = "demo"

[[linters]]
name = "clang-tidy"
command = "run-clang-tidy"
result_template = "warnings generated: "

[output]
path = "history.gs"
format = "binary"
"#;
        let config = Config::parse(toml_str, ConfigFormat::Toml).unwrap();
        assert_eq!(config.linters[0].command.as_deref(), Some("run-clang-tidy"));
        assert_eq!(config.output.format, ReportFormat::Binary);
        assert_eq!(config.workdir, PathBuf::from("/tmp/stories"));
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = "user:\n  url: /srv/repos/demo.git\nlinters:\n  - name: cpplint\n";
        let config = Config::parse(yaml, ConfigFormat::Yaml).unwrap();
        assert!(config.linters[0].parameters.is_empty());
        assert_eq!(config.clone_dir_name(), "demo");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_remote_from_github_coordinates() {
        let config = Config::parse(JSON, ConfigFormat::Json).unwrap();
        let remote = config.remote();
        assert_eq!(remote.url, "https://github.com/octo/demo.git");
        assert_eq!(remote.credentials, Some(("octo".into(), "t0k".into())));
        assert_eq!(config.clone_dir_name(), "demo");
    }

    #[test]
    fn test_missing_repository_rejected() {
        let config = Config::parse(r#"{"user": {"owner": "octo"}}"#, ConfigFormat::Json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.yml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("parameters.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("config")), ConfigFormat::Json);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Config::load(Path::new("/nonexistent/git-stories.json")).is_err());
    }
}
