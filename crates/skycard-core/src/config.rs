use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a single-line summary of all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the persistent key/value store
    pub data_dir: PathBuf,

    /// City catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Forecast API and caching settings
    #[serde(default)]
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// File path or http(s) URL of the comma-separated city list
    #[serde(default = "default_catalog_source")]
    pub source: String,
}

fn default_catalog_source() -> String {
    "data/city_coordinates.csv".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: default_catalog_source(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Forecast endpoint (7Timer! by default)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Forecast product requested from the endpoint
    #[serde(default = "default_product")]
    pub product: String,

    /// Upper bound on a single forecast request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Cache forecast responses per coordinate pair
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,

    /// How long a cached forecast stays fresh
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u32,

    /// How long the saved city/unit preference stays fresh
    #[serde(default = "default_preference_ttl_hours")]
    pub preference_ttl_hours: u32,
}

fn default_api_url() -> String {
    "https://www.7timer.info/bin/api.pl".to_string()
}

fn default_product() -> String {
    "civillight".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_ttl_minutes() -> u32 {
    180
}

fn default_preference_ttl_hours() -> u32 {
    12
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            product: default_product(),
            request_timeout_secs: default_request_timeout_secs(),
            cache_enabled: default_cache_enabled(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
            preference_ttl_hours: default_preference_ttl_hours(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skycard");

        Self {
            data_dir,
            catalog: CatalogConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, writing defaults if it doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Warnings are logged; validation errors fail the load.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.api_url, "weather.api_url", &mut result);

        if self.weather.product.trim().is_empty() {
            result.add_error("weather.product", "Forecast product must not be empty");
        }

        if self.weather.request_timeout_secs == 0 {
            result.add_error(
                "weather.request_timeout_secs",
                "Request timeout must be greater than 0",
            );
        }

        if self.weather.cache_enabled && self.weather.cache_ttl_minutes == 0 {
            result.add_warning(
                "weather.cache_ttl_minutes",
                "Weather cache enabled with a 0 minute TTL; every lookup will miss",
            );
        }

        if self.weather.preference_ttl_hours == 0 {
            result.add_warning(
                "weather.preference_ttl_hours",
                "Saved city will never be restored (0 hours)",
            );
        } else if self.weather.preference_ttl_hours > 24 * 7 {
            result.add_warning(
                "weather.preference_ttl_hours",
                "Saved city is kept for more than a week",
            );
        }

        if self.catalog.source.trim().is_empty() {
            result.add_error("catalog.source", "City catalog source must not be empty");
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("skycard");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_default_ttls() {
        let weather = WeatherConfig::default();
        assert_eq!(weather.cache_ttl_minutes, 180);
        assert_eq!(weather.preference_ttl_hours, 12);
        assert_eq!(weather.product, "civillight");
    }

    #[test]
    fn test_invalid_api_url() {
        let mut config = Config::default();
        config.weather.api_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.api_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.weather.api_url = "ftp://www.7timer.info/bin/api.pl".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = Config::default();
        config.weather.request_timeout_secs = 0;
        let result = config.validate();
        assert!(!result.is_valid());
    }

    #[test]
    fn test_zero_cache_ttl_is_warning() {
        let mut config = Config::default();
        config.weather.cache_ttl_minutes = 0;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.field == "weather.cache_ttl_minutes"));
    }

    #[test]
    fn test_empty_catalog_source_is_error() {
        let mut config = Config::default();
        config.catalog.source = "  ".to_string();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "catalog.source"));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.weather.preference_ttl_hours, 12);
    }

    #[test]
    fn test_load_from_fills_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/tmp/skycard\"\n\n[weather]\npreference_ttl_hours = 24\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/skycard"));
        assert_eq!(config.weather.preference_ttl_hours, 24);
        assert_eq!(config.weather.cache_ttl_minutes, 180);
        assert_eq!(config.catalog.source, "data/city_coordinates.csv");
    }
}
