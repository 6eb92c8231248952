//! Configuration management for the `ThoiTiet` backend
//!
//! Settings come from an optional TOML file layered under `THOITIET_*`
//! environment variables, then get normalized and validated once at startup.

use crate::ThoiTietError;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "THOITIET_CONFIG";

/// Bare API key variable honoured when no key is configured otherwise
pub const API_KEY_ENV: &str = "WEATHERAPI_KEY";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_WEATHER_BASE_URL: &str = "http://api.weatherapi.com/v1";
const DEFAULT_WEATHER_TIMEOUT_SECS: u32 = 10;
const DEFAULT_MAX_RESULTS: usize = 10;
const DEFAULT_MIN_QUERY_CHARS: usize = 2;

const MAX_WEATHER_TIMEOUT_SECS: u32 = 300;
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// Root configuration structure for the `ThoiTiet` backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThoiTietConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// WeatherAPI.com access
    pub weather: WeatherConfig,
    /// City search configuration
    pub search: SearchConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// WeatherAPI.com settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Never logged
    pub api_key: Option<String>,
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u32,
}

/// City search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Results collected before the search stops issuing queries
    pub max_results: usize,
    /// Shortest accepted query, in characters
    pub min_query_chars: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is unset (error, warn, info, debug, trace)
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_WEATHER_TIMEOUT_SECS,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl WeatherConfig {
    /// Whether a non-empty API key is present
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

impl ServerConfig {
    /// `host:port` for binding
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn fill_if_empty(value: &mut String, fallback: &str) {
    if value.trim().is_empty() {
        *value = fallback.to_string();
    }
}

fn invalid(message: impl Into<String>) -> anyhow::Error {
    ThoiTietError::config(message).into()
}

impl ThoiTietConfig {
    /// Load configuration, taking the file from `THOITIET_CONFIG` when set
    pub fn load() -> Result<Self> {
        Self::load_from_path(std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
    }

    /// Load configuration with `config_path` as the file layer.
    ///
    /// Without a path the per-user config file is used, then `./config.toml`.
    /// A missing file is not an error.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path
            .or_else(Self::get_config_path)
            .unwrap_or_else(|| PathBuf::from("config.toml"));

        // THOITIET_WEATHER__API_KEY -> weather.api_key
        let settings = Config::builder()
            .add_source(
                File::from(config_file.as_path())
                    .required(false)
                    .format(FileFormat::Toml),
            )
            .add_source(
                Environment::with_prefix("THOITIET")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| {
                format!("Failed to read configuration from {}", config_file.display())
            })?;

        let mut config: ThoiTietConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        if !config.weather.is_configured() {
            config.weather.api_key = std::env::var(API_KEY_ENV).ok();
        }

        config.apply_defaults();
        config.validate()?;
        Ok(config)
    }

    /// Per-user configuration file, e.g. `~/.config/thoitiet/config.toml`
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("thoitiet").join("config.toml"))
    }

    /// Replace zero and blank values with their defaults; a blank key becomes `None`
    pub fn apply_defaults(&mut self) {
        fill_if_empty(&mut self.server.host, DEFAULT_HOST);
        fill_if_empty(&mut self.weather.base_url, DEFAULT_WEATHER_BASE_URL);
        fill_if_empty(&mut self.logging.level, "info");
        fill_if_empty(&mut self.logging.format, "pretty");

        if self.server.port == 0 {
            self.server.port = DEFAULT_PORT;
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = DEFAULT_WEATHER_TIMEOUT_SECS;
        }
        if self.search.max_results == 0 {
            self.search.max_results = DEFAULT_MAX_RESULTS;
        }
        if self.search.min_query_chars == 0 {
            self.search.min_query_chars = DEFAULT_MIN_QUERY_CHARS;
        }
        if !self.weather.is_configured() {
            self.weather.api_key = None;
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_weather()?;
        self.validate_search()?;
        self.validate_logging()
    }

    /// Sanity-check the WeatherAPI key length.
    ///
    /// A missing key is allowed so the server can start and report
    /// `weatherapi_configured: false` from the health endpoint.
    pub fn validate_api_keys(&self) -> Result<()> {
        let Some(api_key) = &self.weather.api_key else {
            return Ok(());
        };
        match api_key.trim().len() {
            0 => Err(invalid("WeatherAPI key is blank; remove it or set a real key")),
            1..8 => Err(invalid("WeatherAPI key appears to be invalid (too short)")),
            101.. => Err(invalid("WeatherAPI key appears to be invalid (too long)")),
            _ => Ok(()),
        }
    }

    fn validate_weather(&self) -> Result<()> {
        if self.weather.timeout_seconds > MAX_WEATHER_TIMEOUT_SECS {
            return Err(invalid(format!(
                "WeatherAPI timeout cannot exceed {MAX_WEATHER_TIMEOUT_SECS} seconds"
            )));
        }
        let url = &self.weather.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(invalid(format!(
                "WeatherAPI base URL must start with http:// or https:// (got '{url}')"
            )));
        }
        Ok(())
    }

    fn validate_search(&self) -> Result<()> {
        if !(1..=50).contains(&self.search.max_results) {
            return Err(invalid(format!(
                "search.max_results must be between 1 and 50 (got {})",
                self.search.max_results
            )));
        }
        if self.search.min_query_chars > 100 {
            return Err(invalid("search.min_query_chars cannot exceed 100"));
        }
        Ok(())
    }

    fn validate_logging(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(invalid(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(invalid(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                LOG_FORMATS.join(", ")
            )));
        }
        Ok(())
    }
}
