use std::path::Path;

use super::{schema::Config, validate::ConfigError};

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const CONFIG_PATH_ENV: &str = "NEXDASH_CONFIG";

/// Config file named by `NEXDASH_CONFIG`, else `config.toml`.
pub fn config_path_from_env() -> String {
    resolve_config_path(std::env::var(CONFIG_PATH_ENV).ok())
}

fn resolve_config_path(from_env: Option<String>) -> String {
    from_env
        .map(|path| path.trim().to_string())
        .filter(|path| !path.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_str.clone(),
        source,
    })?;
    let config: Config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path_str,
        source,
    })?;
    config.validate()?;
    Ok(config)
}
