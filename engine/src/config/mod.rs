//! Configuration management
//!
//! This module handles loading, validation, and management of the Sara configuration.
//! Configuration is stored in TOML format at ~/.sara/config.toml.
//!
//! # Configuration Sections
//!
//! - **core**: Log level and format
//! - **server**: HTTP bind host and port
//! - **memory**: Conversational memory capacity
//! - **llm**: Generation provider selection and per-provider settings
//! - **search**: Web search endpoint and credentials
//!
//! # Environment Overrides
//!
//! Credentials can be kept out of the file:
//!
//! - `SARA_SEARCH_API_KEY` overrides `search.api_key`
//! - `SARA_SEARCH_ENGINE_ID` overrides `search.engine_id`
//! - `SARA_HF_TOKEN` overrides `llm.huggingface.api_token`
//!
//! # Examples
//!
//! ```no_run
//! use sara_engine::config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load_or_create()?;
//!
//! println!("Listening on {}:{}", config.server.host, config.server.port);
//! println!("Generation provider: {}", config.llm.provider);
//! # Ok(())
//! # }
//! ```

use sdk::errors::EngineError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::memory::DEFAULT_CAPACITY;
use crate::telemetry::LogFormat;

/// Environment variable overriding `search.api_key`
pub const ENV_SEARCH_API_KEY: &str = "SARA_SEARCH_API_KEY";

/// Environment variable overriding `search.engine_id`
pub const ENV_SEARCH_ENGINE_ID: &str = "SARA_SEARCH_ENGINE_ID";

/// Environment variable overriding `llm.huggingface.api_token`
pub const ENV_HF_TOKEN: &str = "SARA_HF_TOKEN";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Core settings
    #[serde(default)]
    pub core: CoreConfig,

    /// HTTP endpoint settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Conversational memory settings
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Text generation settings
    #[serde(default)]
    pub llm: LLMConfig,

    /// Web search settings
    #[serde(default)]
    pub search: SearchConfig,
}

/// Core configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format (auto, pretty, json)
    #[serde(default)]
    pub log_format: LogFormat,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Memory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Number of recent utterances remembered
    #[serde(default = "default_memory_capacity")]
    pub capacity: usize,
}

/// Generation provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    /// Active provider (ollama, huggingface)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Ollama provider settings
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Hugging Face Inference API settings
    #[serde(default)]
    pub huggingface: HuggingFaceConfig,
}

/// Ollama provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL for Ollama API
    #[serde(default = "default_ollama_base_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_ollama_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_generation_timeout")]
    pub timeout_secs: u64,
}

/// Hugging Face Inference API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuggingFaceConfig {
    /// Base URL for the Inference API
    #[serde(default = "default_hf_base_url")]
    pub base_url: String,

    /// Model repository id
    #[serde(default = "default_hf_model")]
    pub model: String,

    /// Access token (optional for public models)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_generation_timeout")]
    pub timeout_secs: u64,
}

/// Web search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Custom Search JSON API endpoint
    #[serde(default = "default_search_base_url")]
    pub base_url: String,

    /// API key
    #[serde(default)]
    pub api_key: String,

    /// Programmable search engine id (`cx`)
    #[serde(default)]
    pub engine_id: String,

    /// Request timeout in seconds
    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_memory_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_provider() -> String {
    "ollama".to_string()
}

fn default_ollama_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:1b".to_string()
}

fn default_hf_base_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_hf_model() -> String {
    "EleutherAI/gpt-neo-125M".to_string()
}

fn default_generation_timeout() -> u64 {
    300
}

fn default_search_base_url() -> String {
    "https://www.googleapis.com/customsearch/v1".to_string()
}

fn default_search_timeout() -> u64 {
    10
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_memory_capacity(),
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            ollama: OllamaConfig::default(),
            huggingface: HuggingFaceConfig::default(),
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_base_url(),
            model: default_ollama_model(),
            timeout_secs: default_generation_timeout(),
        }
    }
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            base_url: default_hf_base_url(),
            model: default_hf_model(),
            api_token: None,
            timeout_secs: default_generation_timeout(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_base_url(),
            api_key: String::new(),
            engine_id: String::new(),
            timeout_secs: default_search_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from the default location (~/.sara/config.toml)
    ///
    /// If the configuration file doesn't exist, creates a default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file cannot be read or written
    /// - TOML parsing fails
    /// - Validation fails
    pub fn load_or_create() -> Result<Self, EngineError> {
        let config_path = Self::default_config_path()?;

        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            Self::create_default(&config_path)
        }
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    pub fn load_from_path(path: &Path) -> Result<Self, EngineError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml_str(&contents)
    }

    /// Parse, apply environment overrides and validate
    pub fn from_toml_str(contents: &str) -> Result<Self, EngineError> {
        let mut config: Config = toml::from_str(contents)
            .map_err(|e| EngineError::Config(format!("Failed to parse config: {}", e)))?;

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Create default configuration and save to path
    ///
    /// Creates the configuration directory if it doesn't exist, generates
    /// a default configuration, and saves it to the specified path. Environment
    /// overrides are applied after saving so credentials never land on disk.
    fn create_default(path: &Path) -> Result<Self, EngineError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                EngineError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let mut config = Self::default();

        let toml_string = toml::to_string_pretty(&config)
            .map_err(|e| EngineError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string)
            .map_err(|e| EngineError::Config(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Wrote default configuration to {}", path.display());

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path (~/.sara/config.toml)
    pub fn default_config_path() -> Result<PathBuf, EngineError> {
        let home = dirs::home_dir()
            .ok_or_else(|| EngineError::Config("Could not determine home directory".to_string()))?;

        Ok(home.join(".sara").join("config.toml"))
    }

    /// Overlay credentials from the environment.
    ///
    /// `lookup` is `std::env::var` in production; empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_SEARCH_API_KEY) {
            self.search.api_key = key;
        }
        if let Some(cx) = non_empty(ENV_SEARCH_ENGINE_ID) {
            self.search.engine_id = cx;
        }
        if let Some(token) = non_empty(ENV_HF_TOKEN) {
            self.llm.huggingface.api_token = Some(token);
        }
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The log level is unknown
    /// - The generation provider is unknown
    /// - Memory capacity or server port is zero
    pub fn validate(&self) -> Result<(), EngineError> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.core.log_level.as_str()) {
            return Err(EngineError::Config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.core.log_level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_providers = ["ollama", "huggingface"];
        if !valid_providers.contains(&self.llm.provider.as_str()) {
            return Err(EngineError::Config(format!(
                "Invalid generation provider '{}'. Must be one of: {}",
                self.llm.provider,
                valid_providers.join(", ")
            )));
        }

        if self.memory.capacity == 0 {
            return Err(EngineError::Config(
                "memory.capacity must be at least 1".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(EngineError::Config(
                "server.port must be between 1 and 65535".to_string(),
            ));
        }

        if self.search.api_key.is_empty() || self.search.engine_id.is_empty() {
            tracing::warn!(
                "Web search credentials are not set; weather questions and rejected answers will get the web hiccup reply"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_creation() {
        let config = Config::default();

        assert_eq!(config.core.log_level, "info");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.memory.capacity, 5);
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.llm.huggingface.model, "EleutherAI/gpt-neo-125M");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.search.timeout_secs, 10);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.core.log_level = "loud".to_string();
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_log_format_from_file() {
        let config = Config::from_toml_str("[core]\nlog_format = \"json\"\n").unwrap();
        assert_eq!(config.core.log_format, LogFormat::Json);
        assert_eq!(Config::default().core.log_format, LogFormat::Auto);
        assert!(Config::from_toml_str("[core]\nlog_format = \"xml\"\n").is_err());
    }

    #[test]
    fn test_invalid_provider() {
        let mut config = Config::default();
        config.llm.provider = "openai".to_string();
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut config = Config::default();
        config.memory.capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_SEARCH_API_KEY, "AIza-test"),
            (ENV_SEARCH_ENGINE_ID, "cx-test"),
            (ENV_HF_TOKEN, "  "),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.search.api_key, "AIza-test");
        assert_eq!(config.search.engine_id, "cx-test");
        assert_eq!(config.llm.huggingface.api_token, None);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_string = toml::to_string(&config).unwrap();

        let deserialized: Config = toml::from_str(&toml_string).unwrap();
        assert_eq!(config.core.log_level, deserialized.core.log_level);
        assert_eq!(config.llm.provider, deserialized.llm.provider);
        assert_eq!(config.memory.capacity, deserialized.memory.capacity);
    }
}
