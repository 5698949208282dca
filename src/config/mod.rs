//! Configuration management for gradebook

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::{ClientOptions, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::{ConfigError, Result};

/// Directory under the home directory holding config and session files
const APP_DIR: &str = ".gradebook";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Base URL of the course/grade API
    #[serde(default = "default_base_url")]
    pub api_base_url: String,

    /// Where the session is persisted (defaults to ~/.gradebook/session.yaml)
    #[serde(default)]
    pub session_file: Option<PathBuf>,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Accept self-signed certificates from the API
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            session_file: None,
            request_timeout_secs: default_timeout_secs(),
            accept_invalid_certs: false,
        }
    }
}

impl Config {
    fn app_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;
        Ok(home.join(APP_DIR))
    }

    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("config.yaml"))
    }

    /// Resolve an optional override to a concrete config path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Session file location, configured or default
    pub fn session_path(&self) -> Result<PathBuf> {
        match self.session_file {
            Some(ref path) => Ok(path.clone()),
            None => Ok(Self::app_dir()?.join("session.yaml")),
        }
    }

    /// HTTP settings, with `api_url` taking precedence over the file
    pub fn client_options(&self, api_url: Option<&str>) -> ClientOptions {
        ClientOptions::new(api_url.unwrap_or(&self.api_base_url))
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
            .accept_invalid_certs(self.accept_invalid_certs)
    }

    fn validate(&self) -> Result<()> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(ConfigError::Invalid(format!(
                "api_base_url must be an http(s) URL, got '{}'",
                self.api_base_url
            ))
            .into());
        }
        if self.request_timeout_secs == 0 {
            return Err(
                ConfigError::Invalid("request_timeout_secs must be positive".to_string()).into(),
            );
        }
        Ok(())
    }
}
