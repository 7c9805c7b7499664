//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::paths::config_path;
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Debug server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Debug client settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Diff tool settings
    #[serde(default)]
    pub diff: DiffConfig,
}

/// Debug server settings
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// How long to wait after starting the server before running the client.
    /// There is no readiness signal, so this has to cover server startup.
    #[serde(default = "default_startup_delay")]
    pub startup_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            startup_delay_ms: default_startup_delay(),
        }
    }
}

impl ServerConfig {
    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }
}

fn default_startup_delay() -> u64 {
    1000
}

/// Debug client settings
#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    /// Command prefix used to run the client script, e.g. `["python"]`
    #[serde(default = "default_interpreter")]
    pub interpreter: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
        }
    }
}

// Windows cannot execute scripts through their shebang line.
#[cfg(windows)]
fn default_interpreter() -> Vec<String> {
    vec!["python".to_string()]
}

#[cfg(not(windows))]
fn default_interpreter() -> Vec<String> {
    Vec::new()
}

/// Diff tool settings
#[derive(Debug, Deserialize)]
pub struct DiffConfig {
    /// git executable used for `git diff --no-index`
    #[serde(default = "default_git")]
    pub git: String,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self { git: default_git() }
    }
}

fn default_git() -> String {
    "git".to_string()
}

impl Config {
    /// Load configuration from an explicit path, or from the default
    /// config file location
    ///
    /// An explicit path must exist. The default location is optional and
    /// yields the default configuration when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    /// Parse a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, e))?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), ?config, "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Resolve the git executable through PATH
    pub fn git_program(&self) -> Result<PathBuf> {
        which::which(&self.diff.git).map_err(|_| Error::ToolNotFound {
            name: self.diff.git.clone(),
        })
    }
}
