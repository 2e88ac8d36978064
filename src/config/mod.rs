mod types;

pub use types::*;

use crate::Result;
use std::{env, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads `CONFIG_PATH`, else `config.yaml`. Without either, defaults apply.
pub async fn load() -> Result<Config> {
    if let Ok(config_path) = env::var("CONFIG_PATH") {
        return load_from(config_path).await;
    }

    if tokio::fs::try_exists(DEFAULT_CONFIG_PATH)
        .await
        .unwrap_or(false)
    {
        load_from(DEFAULT_CONFIG_PATH).await
    } else {
        debug!("No {} found, using default configuration", DEFAULT_CONFIG_PATH);
        Ok(Config::default())
    }
}

pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}
