// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::{ArtifactPaths, TrainingConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub paths: ArtifactPaths,
    pub training: TrainingConfig,
    pub server: ServerSettings,
    /// JSON log sink in addition to stderr
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub address: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults { missing: PathBuf, base_dir: PathBuf },
}

impl ConfigSource {
    pub fn log(&self, environment: &str) {
        match self {
            Self::File(path) => info!(
                "Loaded configuration for environment '{}' from {}",
                environment,
                path.display()
            ),
            Self::Defaults { missing, base_dir } => warn!(
                "{} not found, using default data layout under {}",
                missing.display(),
                base_dir.display()
            ),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: Option<EnvironmentConfig>,
}

impl EnvironmentConfig {
    /// Load configuration based on environment
    ///
    /// A missing config file is not an error: the built-in layout under the
    /// working directory is used instead. Runs before logging is set up, so
    /// the returned [`ConfigSource`] is logged by the caller.
    pub fn load(config_path: &Path) -> Result<(Self, ConfigSource)> {
        let environment = Self::get_environment();
        let base_dir = std::env::current_dir().context("Failed to get current directory")?;

        if !config_path.exists() {
            let source = ConfigSource::Defaults {
                missing: config_path.to_path_buf(),
                base_dir: base_dir.clone(),
            };
            return Ok((Self::default().resolved(&base_dir), source));
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config = Self::from_yaml(&content, &environment)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok((
            config.resolved(&base_dir),
            ConfigSource::File(config_path.to_path_buf()),
        ))
    }

    pub fn get_environment() -> String {
        std::env::var("CAREER_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;

        let config = match (environment, config_file.production) {
            ("production", Some(production)) => production,
            ("production", None) => {
                anyhow::bail!(
                    "environment is 'production' but the config has no production section"
                )
            }
            _ => config_file.local,
        };

        config.training.validate()?;
        Ok(config)
    }

    fn resolved(mut self, base_dir: &Path) -> Self {
        self.paths = self.paths.resolve_against(base_dir);
        self.log_file = self
            .log_file
            .map(|p| if p.is_absolute() { p } else { base_dir.join(p) });
        self
    }
}
