//! Layered configuration: defaults, then a TOML file, then `MOCKBANK_*` environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const FILE_NAME: &str = "config.toml";

/// Opaque settings addressing the external identity service. Passed through untouched.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct IdentitySettings {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub app_id: String,
}

impl std::fmt::Debug for IdentitySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = if self.api_key.is_empty() {
            ""
        } else {
            "<redacted>"
        };
        f.debug_struct("IdentitySettings")
            .field("api_key", &key)
            .field("auth_domain", &self.auth_domain)
            .field("project_id", &self.project_id)
            .field("app_id", &self.app_id)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct LogSettings {
    /// `EnvFilter` directive, e.g. "mockbank=debug".
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub identity: IdentitySettings,
    pub log: LogSettings,
}

impl Config {
    /// Load configuration. An explicit `path` must exist; the default location is optional.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_path() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub(crate) fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Overwrite fields from `MOCKBANK_*` variables. Empty values are ignored.
    pub(crate) fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = var("MOCKBANK_API_KEY") {
            self.identity.api_key = v;
        }
        if let Some(v) = var("MOCKBANK_AUTH_DOMAIN") {
            self.identity.auth_domain = v;
        }
        if let Some(v) = var("MOCKBANK_PROJECT_ID") {
            self.identity.project_id = v;
        }
        if let Some(v) = var("MOCKBANK_APP_ID") {
            self.identity.app_id = v;
        }
        if let Some(v) = var("MOCKBANK_LOG") {
            self.log.filter = Some(v);
        }
    }
}

fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "mockbank", "MockBank")
        .map(|dirs| dirs.config_dir().join(FILE_NAME))
}
