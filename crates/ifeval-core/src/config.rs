use crate::errors::ConfigError;
use crate::judge::JudgeConfig;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Read and deserialize a YAML file.
pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    serde_yaml::from_str(&raw).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load and validate a judge configuration file.
pub fn load_judge_config(path: &Path) -> Result<JudgeConfig, ConfigError> {
    let cfg: JudgeConfig = load_yaml(path)?;
    cfg.validate()?;
    Ok(cfg)
}
