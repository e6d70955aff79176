//! Runtime configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
    pub cache_capacity: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; pagepick/1.0)".to_string(),
            timeout_secs: 10,
            cache_capacity: 200,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PagepickConfig {
    pub fetch: FetchConfig,
    /// Feed store location; defaults to `~/.pagepick/feeds.json`.
    pub store_path: Option<PathBuf>,
}

impl PagepickConfig {
    /// Load from default locations:
    /// 1. ./pagepick.yaml
    /// 2. ~/.pagepick/config.yaml
    /// 3. Default configuration
    pub async fn load_default() -> Result<Self, ConfigError> {
        let local_config = PathBuf::from("./pagepick.yaml");
        if local_config.exists() {
            return Self::load_from(&local_config).await;
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".pagepick").join("config.yaml");
            if home_config.exists() {
                return Self::load_from(&home_config).await;
            }
        }

        Ok(Self::default())
    }

    pub async fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
