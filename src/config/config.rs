use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::constants::{API_URL_ENV, CONFIG_FILE, PROJECT_ID_ENV, TOKEN_ENV, TRACKER_API_URL};
use crate::error::{TrackerError, TrackerResult};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE))
}

pub fn load_config() -> Config {
    config_path()
        .map(|path| load_config_from(&path))
        .unwrap_or_default()
}

/// Missing or unreadable files fall back to the default config.
pub fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }

    fs::read_to_string(path)
        .ok()
        .and_then(|content| serde_json::from_str(&content).ok())
        .unwrap_or_default()
}

pub fn save_config(config: &Config) -> TrackerResult<PathBuf> {
    let path = config_path()
        .ok_or_else(|| TrackerError::ConfigError("Could not find home directory".to_string()))?;
    save_config_to(config, &path)?;
    Ok(path)
}

pub fn save_config_to(config: &Config, path: &Path) -> TrackerResult<()> {
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

pub fn get_token(config: &Config) -> Option<String> {
    // First check environment variable
    if let Ok(token) = env::var(TOKEN_ENV) {
        if !token.is_empty() {
            return Some(token);
        }
    }

    config.token.clone()
}

pub fn get_project_id(config: &Config) -> TrackerResult<Option<u64>> {
    if let Ok(raw) = env::var(PROJECT_ID_ENV) {
        if !raw.is_empty() {
            let id = raw.trim().parse::<u64>().map_err(|_| {
                TrackerError::InvalidInput(format!("{} must be a number, got '{}'", PROJECT_ID_ENV, raw))
            })?;
            return Ok(Some(id));
        }
    }

    Ok(config.project_id)
}

pub fn get_api_url(config: &Config) -> String {
    env::var(API_URL_ENV)
        .ok()
        .filter(|url| !url.is_empty())
        .or_else(|| config.api_url.clone())
        .unwrap_or_else(|| TRACKER_API_URL.to_string())
}
