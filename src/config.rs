use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Base URL of the event server
    pub server_url: ConfigValue<String>,
    /// Events fetched per page
    pub page_size: ConfigValue<u32>,
    /// Bearer key for authenticated endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    server_url: Option<String>,
    page_size: Option<u32>,
    api_key: Option<String>,
}

const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
const DEFAULT_PAGE_SIZE: u32 = 20;

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut server_url =
            ConfigValue::new(DEFAULT_SERVER_URL.to_string(), ConfigSource::Default);
        let mut page_size = ConfigValue::new(DEFAULT_PAGE_SIZE, ConfigSource::Default);
        let mut api_key = None;
        let mut config_file = None;

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(url) = file_config.server_url {
                server_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(size) = file_config.page_size {
                page_size = ConfigValue::new(size, ConfigSource::File);
            }
            if let Some(key) = file_config.api_key {
                api_key = Some(key);
            }
        }

        // Apply environment variable overrides
        if let Ok(url) = std::env::var("EVENTAPP_SERVER_URL") {
            server_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(size) = std::env::var("EVENTAPP_PAGE_SIZE") {
            let parsed = size
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidPageSize(size))?;
            page_size = ConfigValue::new(parsed, ConfigSource::Environment);
        }
        if let Ok(key) = std::env::var("EVENTAPP_API_KEY") {
            api_key = Some(key);
        }

        if page_size.value == 0 {
            return Err(ConfigError::InvalidPageSize("0".to_string()));
        }

        Ok(Self {
            server_url,
            page_size,
            api_key,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/eventapp/
    /// - macOS: ~/Library/Application Support/eventapp/
    /// - Windows: %APPDATA%/eventapp/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eventapp")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidPageSize(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidPageSize(value) => {
                write!(
                    f,
                    "Invalid page size '{}': expected a positive integer",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
