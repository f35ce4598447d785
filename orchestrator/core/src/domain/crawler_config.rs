// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Crawler Configuration Types
//
// Kubernetes-style manifest (apiVersion/kind/spec) controlling how the CLI
// drives a navigation:
// - Default navigation mode and optional caller-level deadline
// - Event bus capacity
// - Log level

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::navigation::NavigationMode;

pub const API_VERSION: &str = "mazebot/v1";
pub const KIND: &str = "CrawlerConfig";

/// Top-level crawler configuration manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// API version (must be "mazebot/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "CrawlerConfig")
    pub kind: String,

    #[serde(default)]
    pub spec: CrawlerConfigSpec,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CrawlerConfigSpec {
    #[serde(default)]
    pub navigation: NavigationSettings,

    #[serde(default)]
    pub events: EventSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NavigationSettings {
    #[serde(default)]
    pub mode: NavigationMode,

    /// Cancel the navigation after this many milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSettings {
    /// Broadcast buffer size; slow subscribers lag beyond this.
    #[serde(default = "default_event_capacity")]
    pub capacity: usize,
}

fn default_event_capacity() -> usize {
    1000
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            capacity: default_event_capacity(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            spec: CrawlerConfigSpec::default(),
        }
    }
}

impl CrawlerConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. MAZEBOT_CONFIG_PATH environment variable
    /// 2. ./mazebot-config.yaml (working directory)
    /// 3. ~/.mazebot/config.yaml (user home)
    /// 4. /etc/mazebot/config.yaml (system, Unix) or C:\ProgramData\Mazebot\config.yaml (Windows)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("MAZEBOT_CONFIG_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./mazebot-config.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".mazebot").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        #[cfg(unix)]
        let system_config = PathBuf::from("/etc/mazebot/config.yaml");
        #[cfg(windows)]
        let system_config = PathBuf::from("C:\\ProgramData\\Mazebot\\config.yaml");

        if system_config.exists() {
            return Some(system_config);
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit path must load
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path)
                .map_err(|e| anyhow::anyhow!("Failed to load config at {:?}: {}", path, e))?;
            config.apply_env_overrides();
            return Ok(config);
        }

        let mut config = match Self::discover_config() {
            Some(config_path) => {
                tracing::info!("Loading configuration from discovered path: {:?}", config_path);
                Self::from_yaml_file(config_path)?
            }
            None => {
                tracing::debug!("No configuration file found in standard locations. Using defaults.");
                Self::default()
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `MAZEBOT_MODE`, `MAZEBOT_DEADLINE_MS` and `MAZEBOT_LOG_LEVEL`.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup. Invalid values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("MAZEBOT_MODE") {
            match val.parse::<NavigationMode>() {
                Ok(mode) => {
                    tracing::info!("Environment override: MAZEBOT_MODE={}", mode);
                    self.spec.navigation.mode = mode;
                }
                Err(e) => tracing::warn!("Invalid value for MAZEBOT_MODE: {}. Ignoring.", e),
            }
        }

        if let Some(val) = lookup("MAZEBOT_DEADLINE_MS") {
            match val.trim().parse::<u64>() {
                Ok(deadline) => {
                    tracing::info!("Environment override: MAZEBOT_DEADLINE_MS={}", deadline);
                    self.spec.navigation.deadline_ms = Some(deadline);
                }
                Err(_) => tracing::warn!(
                    "Invalid value for MAZEBOT_DEADLINE_MS: '{}'. Expected milliseconds. Ignoring.",
                    val
                ),
            }
        }

        if let Some(val) = lookup("MAZEBOT_LOG_LEVEL") {
            if !val.trim().is_empty() {
                self.spec.logging.level = val.trim().to_string();
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != API_VERSION {
            anyhow::bail!(
                "Invalid apiVersion: '{}'. Must be '{}'",
                self.api_version,
                API_VERSION
            );
        }

        if self.kind != KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, KIND);
        }

        if self.spec.events.capacity == 0 {
            anyhow::bail!("spec.events.capacity must be greater than zero");
        }

        if self.spec.navigation.deadline_ms == Some(0) {
            anyhow::bail!("spec.navigation.deadline_ms must be greater than zero when set");
        }

        if self.spec.logging.level.trim().is_empty() {
            anyhow::bail!("spec.logging.level cannot be empty");
        }

        Ok(())
    }
}
