//! Configuration management for nutriscan
//!
//! Config stored at: ~/.config/nutriscan/config.json
//! The API key is never stored here; it comes from the environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use nutriscan_types::{ConfigError, OutputFormat, Result, DEFAULT_MANUAL_WEIGHT_G, DEFAULT_PRICE};
use nutriscan_vision::ai::gemini::{DEFAULT_API_BASE, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use nutriscan_vision::remote::DEFAULT_REMOTE_URL;
use nutriscan_vision::GeminiOptions;
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Vision model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the model API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL of the external label-analysis service
    #[serde(default = "default_remote_url")]
    pub remote_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Price used when none is given (R$)
    #[serde(default = "default_price")]
    pub default_price: f64,

    /// Container weight used when none is given (g)
    #[serde(default = "default_weight_g")]
    pub default_weight_g: u32,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_remote_url() -> String {
    DEFAULT_REMOTE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_price() -> f64 {
    DEFAULT_PRICE
}

fn default_weight_g() -> u32 {
    DEFAULT_MANUAL_WEIGHT_G
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base_url: default_api_base_url(),
            remote_url: default_remote_url(),
            timeout_secs: default_timeout_secs(),
            output_format: default_output_format(),
            default_price: default_price(),
            default_weight_g: default_weight_g(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("nutriscan");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue("model must not be empty".into()).into());
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("timeout_secs must be at least 1".into()).into());
        }
        if !(self.default_price >= 0.0) {
            return Err(ConfigError::InvalidValue("default_price must not be negative".into()).into());
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn gemini_options(&self) -> GeminiOptions {
        GeminiOptions::default()
            .with_model(self.model.clone())
            .with_api_base(self.api_base_url.clone())
            .with_timeout(self.timeout())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "NutriScan Configuration")?;
        writeln!(f, "=======================")?;
        writeln!(f)?;
        writeln!(f, "Model:          {}", self.model)?;
        writeln!(f, "API base URL:   {}", self.api_base_url)?;
        writeln!(f, "Remote URL:     {}", self.remote_url)?;
        writeln!(f, "Timeout:        {}s", self.timeout_secs)?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f, "Default price:  R$ {:.2}", self.default_price)?;
        writeln!(f, "Default weight: {}g", self.default_weight_g)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}
