mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const PORT_ENV: &str = "PORT";

/// Loads configuration from the optional YAML file at `CONFIG_PATH`, then
/// applies environment overrides.
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let mut config = load_file(&config_path).await?;
    config.apply_env(|key| env::var(key).ok())?;

    Ok(config)
}

/// Reads a YAML config file. A missing file yields the defaults.
pub async fn load_file(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();

    if !tokio::fs::try_exists(path).await? {
        debug!("No configuration file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

impl Config {
    /// Overrides the API key and port from `lookup`. The model is never
    /// taken from the environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup(API_KEY_ENV) {
            self.llm.api_key = api_key;
        }

        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| Error::config(format!("Invalid {}: '{}'", PORT_ENV, port)))?;
        }

        Ok(())
    }
}
