use super::schema::ChanselConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from default locations:
    /// 1. ./chansel.yaml
    /// 2. ~/.chansel/config.yaml
    /// 3. Default configuration
    pub async fn load_default() -> Result<ChanselConfig, ConfigError> {
        let local_config = PathBuf::from("./chansel.yaml");
        if local_config.exists() {
            return Self::load_from(&local_config).await;
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".chansel").join("config.yaml");
            if home_config.exists() {
                return Self::load_from(&home_config).await;
            }
        }

        Ok(ChanselConfig::default())
    }

    /// Load an explicit path if given, otherwise fall back to the default
    /// search order.
    pub async fn load(path: Option<&Path>) -> Result<ChanselConfig, ConfigError> {
        match path {
            Some(path) => Self::load_from(path).await,
            None => Self::load_default().await,
        }
    }

    pub async fn load_from(path: &Path) -> Result<ChanselConfig, ConfigError> {
        debug!("Loading config from {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        let config: ChanselConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
