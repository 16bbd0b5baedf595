use serde::Deserialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;

use themectl_client::ThemeClient;

use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct CliConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub endpoint: String,
    pub theme_id: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct ThemeConfig {
    /// Local directory that asset keys are relative to.
    #[serde(default = "default_theme_root")]
    pub root: PathBuf,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            root: default_theme_root(),
        }
    }
}

fn default_api_key_env() -> String {
    "THEMECTL_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_theme_root() -> PathBuf {
    PathBuf::from(".")
}

impl CliConfig {
    /// `<config dir>/config.toml` for the current platform.
    pub fn default_path() -> Result<PathBuf, AppError> {
        let dirs = directories::ProjectDirs::from("com", "themectl", "themectl")
            .ok_or_else(|| AppError::config_error("could not determine config directory", None))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load the config from `path`, or from [`CliConfig::default_path`].
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        let details = json!({ "path": config_path.display().to_string() });

        let content = std::fs::read_to_string(&config_path).map_err(|e| {
            AppError::config_error(
                format!(
                    "could not read config file at {}: {e}",
                    config_path.display()
                ),
                Some(details.clone()),
            )
        })?;

        toml::from_str(&content).map_err(|e| {
            AppError::config_error(
                format!("invalid config file {}: {e}", config_path.display()),
                Some(details),
            )
        })
    }

    /// Read the API key from the environment variable named in the config.
    pub fn api_key(&self) -> Result<String, AppError> {
        let name = &self.server.api_key_env;
        std::env::var(name).map_err(|_| {
            AppError::auth_error(
                format!("environment variable '{name}' not set (required for API authentication)"),
                Some(json!({ "env": name })),
            )
        })
    }

    /// Build the HTTP client for the configured theme.
    pub fn connect(&self) -> Result<ThemeClient, AppError> {
        let api_key = self.api_key()?;
        let client = ThemeClient::new(
            &self.server.endpoint,
            &self.server.theme_id,
            api_key,
            Duration::from_secs(self.server.timeout_secs),
        )?;
        Ok(client)
    }
}
