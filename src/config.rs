use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_APPROVAL_REACTION: &str = "THUMBS_UP";

#[derive(Debug, Deserialize, Serialize)]
pub struct AppConfig {
    /// GitHub reaction content that counts as approval
    #[serde(default = "default_approval_reaction")]
    pub approval_reaction: String,
}

fn default_approval_reaction() -> String {
    DEFAULT_APPROVAL_REACTION.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            approval_reaction: default_approval_reaction(),
        }
    }
}

impl AppConfig {
    /// Load from `path` if given, otherwise fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to load config file: {:?}", path.as_ref()))
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let mut config: AppConfig =
            toml::from_str(config_str).context("Failed to parse config")?;

        config.approval_reaction = expand_env(config.approval_reaction.trim())?;

        if config.approval_reaction.is_empty() {
            return Err(anyhow::anyhow!("Approval reaction cannot be empty"));
        }

        Ok(config)
    }
}

/// Replace a whole-value `${VAR}` with the contents of that environment variable
fn expand_env(value: &str) -> Result<String> {
    match value.strip_prefix("${").and_then(|rest| rest.strip_suffix('}')) {
        Some(env_var_name) => env::var(env_var_name)
            .with_context(|| format!("Environment variable {} not set", env_var_name)),
        None => Ok(value.to_string()),
    }
}
