use crate::domain::error::NlqError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub timeout_secs: Option<u64>,
    pub http_proxy: Option<String>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub format: RenderFormat,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub clear_screen: bool,
    #[serde(default)]
    pub latest_only: bool,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    #[default]
    Text,
    Html,
    Json,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: None,
            http_proxy: None,
            user_agent: default_user_agent(),
            format: RenderFormat::default(),
            theme: default_theme(),
            clear_screen: false,
            latest_only: false,
            logging: Logging::default(),
        }
    }
}

// Defaults
fn default_endpoint() -> String {
    "http://127.0.0.1:5000/query".to_string()
}
fn default_user_agent() -> String {
    concat!("nlq/", env!("CARGO_PKG_VERSION")).to_string()
}
fn default_theme() -> String {
    "default".to_string()
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("nlq").join("config.toml"))
}

pub fn load_config() -> Result<Config, NlqError> {
    match get_config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(Config::default()),
    }
}

/// Read a config file, falling back to defaults when it is missing or unparsable
pub fn load_config_from(path: &Path) -> Result<Config, NlqError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    match toml::from_str::<Config>(&content) {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!(
                "Warning: Failed to parse config file: {}. Using defaults.",
                e
            );
            Ok(Config::default())
        }
    }
}

pub fn generate_config_sample() -> Result<(), NlqError> {
    let path = get_config_path()
        .ok_or_else(|| NlqError::Config("Cannot determine config directory".to_string()))?;

    if write_config_sample(&path)? {
        println!("Generated config file at: {}", path.display());
    } else {
        eprintln!("Config file already exists at: {}", path.display());
    }
    Ok(())
}

/// Write the default config to `path`. Returns false if a file is already there.
pub fn write_config_sample(path: &Path) -> Result<bool, NlqError> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let toml_content = toml::to_string_pretty(&Config::default())
        .map_err(|e| NlqError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(path, toml_content)
        .map_err(|e| NlqError::Config(format!("Failed to write config file: {}", e)))?;
    Ok(true)
}
