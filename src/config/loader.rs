//! Configuration file loading and saving

use super::validation;
use crate::constants;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory receiving `index.html` and `data.json`
    pub output_dir: String,
    /// Port for the local report server
    pub port: u16,
    /// Bind address for the local report server
    pub host: String,
    /// Timeout for the short git queries
    pub git_timeout_secs: u64,
    /// Timeout for the commit log query
    pub log_timeout_secs: u64,
    /// Extra directory names pruned by every walker
    pub ignore: Vec<String>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path))?;

        // An empty document deserializes to unit, not to a mapping
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file '{}'", path))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Load the given config file, or the default one when it is present.
    ///
    /// An explicitly requested file must exist. Without one, `repodash.yaml`
    /// in the current directory is used if found, otherwise defaults apply.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(constants::config::DEFAULT_CONFIG_FILE).is_file() => {
                Self::load(constants::config::DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self).map_err(validation::validation_errors_to_anyhow)
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }

    pub fn git_timeout(&self) -> Duration {
        Duration::from_secs(self.git_timeout_secs)
    }

    pub fn log_timeout(&self) -> Duration {
        Duration::from_secs(self.log_timeout_secs)
    }

    /// Apply command line overrides on top of file values
    pub fn with_overrides(
        mut self,
        output_dir: Option<String>,
        port: Option<u16>,
        host: Option<String>,
    ) -> Result<Self> {
        if let Some(output_dir) = output_dir {
            self.output_dir = output_dir;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(host) = host {
            self.host = host;
        }
        self.validate()?;
        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: constants::config::DEFAULT_OUTPUT_DIR.to_string(),
            port: constants::config::DEFAULT_PORT,
            host: constants::config::DEFAULT_HOST.to_string(),
            git_timeout_secs: constants::git::DEFAULT_QUERY_TIMEOUT_SECS,
            log_timeout_secs: constants::git::DEFAULT_LOG_TIMEOUT_SECS,
            ignore: Vec::new(),
        }
    }
}
