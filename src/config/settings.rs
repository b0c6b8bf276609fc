// src/config/settings.rs
//
// Runtime settings for an evaluation pass, loadable from a JSON file and
// overridable from the command line.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::detection::Platform;
use crate::error::ConfigError;

const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 2_000;
const MIN_COMMAND_TIMEOUT_MS: u64 = 10;

/// Settings shared by the probes and the front ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Upper bound for any external command a probe launches
    pub command_timeout_ms: u64,
    /// Probe set to run; `None` selects the one compiled for this target
    pub platform: Option<Platform>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            command_timeout_ms: DEFAULT_COMMAND_TIMEOUT_MS,
            platform: None,
        }
    }
}

impl CheckConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms.max(MIN_COMMAND_TIMEOUT_MS))
    }

    /// Load settings from a JSON file; missing fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `<config dir>/rootdeductor/config.json`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rootdeductor").join("config.json"))
    }

    /// Load from the default location when present, otherwise use defaults
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Builder applying overrides on top of a base configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: CheckConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: CheckConfig) -> Self {
        Self { config }
    }

    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.config.command_timeout_ms = timeout.as_millis().min(u64::MAX as u128) as u64;
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.config.platform = Some(platform);
        self
    }

    pub fn build(self) -> CheckConfig {
        self.config
    }
}
