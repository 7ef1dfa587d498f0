use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://squad.cronberry.com";

/// The deployment under test and where its sources live on disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    /// Where requests are sent. The API base is `<base_url>/api`.
    pub base_url: String,
    /// Host substring that advertised URLs must carry. Derived from
    /// `base_url` when unset.
    pub expected_host: Option<String>,
    /// Provider key in `/api/auth/providers` and the sign-in path segment.
    pub identity_provider: String,
    pub identity_provider_host: String,
    pub app_root: PathBuf,
    pub env_file: PathBuf,
    pub auth_route_file: PathBuf,
    pub middleware_file: PathBuf,
    pub api_route_file: PathBuf,
    pub endpoints: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        TargetConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            expected_host: None,
            identity_provider: "google".to_string(),
            identity_provider_host: "accounts.google.com".to_string(),
            app_root: PathBuf::from("/app"),
            env_file: PathBuf::from(".env"),
            auth_route_file: PathBuf::from("app/api/auth/[...nextauth]/route.js"),
            middleware_file: PathBuf::from("middleware.js"),
            api_route_file: PathBuf::from("app/api/[[...path]]/route.js"),
            endpoints: ["/summary", "/activity", "/leaderboard", "/rules", "/cycles"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timeout_secs: 10,
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub expected_host: Option<String>,
    pub app_root: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl TargetConfig {
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(v) = overrides.base_url {
            self.base_url = v;
        }
        if let Some(v) = overrides.expected_host {
            self.expected_host = Some(v);
        }
        if let Some(v) = overrides.app_root {
            self.app_root = v;
        }
        if let Some(v) = overrides.env_file {
            self.env_file = v;
        }
        if let Some(v) = overrides.timeout_secs {
            self.timeout_secs = v;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        reqwest::Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base_url: {}", self.base_url))?;
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }
        if self.endpoints.is_empty() {
            anyhow::bail!("endpoints must list at least one path");
        }
        if self.production_host().trim().is_empty() {
            anyhow::bail!("expected_host must not be empty");
        }
        if self.identity_provider.trim().is_empty() {
            anyhow::bail!("identity_provider must not be empty");
        }
        if self.identity_provider_host.trim().is_empty() {
            anyhow::bail!("identity_provider_host must not be empty");
        }
        Ok(())
    }

    pub fn api_base(&self) -> String {
        format!("{}/api", self.base_url.trim_end_matches('/'))
    }

    /// `squad.cronberry.com` for `https://squad.cronberry.com`.
    pub fn production_host(&self) -> String {
        match &self.expected_host {
            Some(host) => host.clone(),
            None => self
                .base_url
                .trim_start_matches("https://")
                .trim_start_matches("http://")
                .trim_end_matches('/')
                .to_string(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve a configured path against `app_root`. Absolute paths are kept.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.app_root.join(path)
    }
}

/// Load target configuration from a TOML file.
pub fn load_config(path: &Path) -> anyhow::Result<TargetConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: TargetConfig =
        toml::from_str(&content).with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(config)
}
