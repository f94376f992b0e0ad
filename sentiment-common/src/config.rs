//! Configuration management for the sentiment services.
//!
//! The service reads a single configuration file at `~/.sentiment/config.json`.
//!
//! # Configuration Priority
//!
//! 1. Environment variables
//! 2. Explicit config file values
//! 3. Default values
//!
//! # Environment Variable Mapping
//!
//! ## Server
//! - `SENTIMENT_PORT` → network.port
//! - `SENTIMENT_BIND_ADDRESS` → network.bind
//! - `SENTIMENT_LOG_LEVEL` → observability.log_level
//! - `SENTIMENT_LOG_FORMAT` → observability.log_format
//!
//! ## Twitter credentials (→ twitter.*)
//! - `TWITTER_CONSUMER_KEY`, `TWITTER_CONSUMER_SECRET`
//! - `TWITTER_ACCESS_TOKEN`, `TWITTER_ACCESS_TOKEN_SECRET`
//!
//! ## Remote model (→ remote_model.*)
//! - `HF_API_TOKEN` → remote_model.api_token
//! - `SENTIMENT_REMOTE_ENDPOINT` → remote_model.endpoint

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result, ResultExt};

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".sentiment"),
        |dirs| dirs.home_dir().join(".sentiment"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

// ============================================================================
// Network Configuration
// ============================================================================

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Bind address.
    /// Default: "127.0.0.1" (local only). Set to "0.0.0.0" for remote access.
    #[serde(default = "default_bind_address")]
    pub bind: String,

    /// HTTP port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind: default_bind_address(),
            port: default_port(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5001
}

// ============================================================================
// Observability Configuration
// ============================================================================

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level", alias = "level")]
    pub log_level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format", alias = "format")]
    pub log_format: String,

    /// Additional module targets forced to `warn`.
    ///
    /// Built-in noisy modules (hyper, reqwest, h2, rustls, ...) are always
    /// filtered; this list adds custom ones.
    #[serde(default)]
    pub excluded_targets: Vec<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            excluded_targets: Vec::new(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

// ============================================================================
// Twitter Configuration
// ============================================================================

/// Twitter API credentials and search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterConfig {
    #[serde(default)]
    pub consumer_key: Option<String>,

    #[serde(default)]
    pub consumer_secret: Option<String>,

    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default)]
    pub access_token_secret: Option<String>,

    /// API base URL (overridable for tests and proxies)
    #[serde(default = "default_twitter_api_base")]
    pub api_base: String,

    /// Default number of tweets fetched per keyword search
    #[serde(default = "default_max_tweets")]
    pub max_tweets: usize,
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            consumer_key: None,
            consumer_secret: None,
            access_token: None,
            access_token_secret: None,
            api_base: default_twitter_api_base(),
            max_tweets: default_max_tweets(),
        }
    }
}

impl TwitterConfig {
    /// App credentials (consumer key and secret), if both are set and non-empty.
    pub fn app_credentials(&self) -> Option<(&str, &str)> {
        let key = self.consumer_key.as_deref().filter(|k| !k.is_empty())?;
        let secret = self.consumer_secret.as_deref().filter(|s| !s.is_empty())?;
        Some((key, secret))
    }
}

fn default_twitter_api_base() -> String {
    "https://api.twitter.com".to_string()
}

fn default_max_tweets() -> usize {
    100
}

// ============================================================================
// Remote Model Configuration
// ============================================================================

/// Hosted pretrained sentiment model (Hugging Face inference API).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteModelConfig {
    /// When disabled the remote strategy always answers with the lexicon scorer
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_remote_endpoint")]
    pub endpoint: String,

    /// Bearer token sent in the `Authorization` header
    #[serde(default)]
    pub api_token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_remote_timeout")]
    pub timeout_secs: u64,
}

impl Default for RemoteModelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_remote_endpoint(),
            api_token: None,
            timeout_secs: default_remote_timeout(),
        }
    }
}

fn default_remote_endpoint() -> String {
    "https://api-inference.huggingface.co/models/cardiffnlp/twitter-roberta-base-sentiment-latest"
        .to_string()
}

fn default_remote_timeout() -> u64 {
    30
}

// ============================================================================
// Classifier Configuration
// ============================================================================

/// Local classifier settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Optional stopword file (one word per line) replacing the built-in English list
    #[serde(default)]
    pub stopwords_path: Option<PathBuf>,

    /// Fit the statistical model on the bootstrap corpus at startup
    #[serde(default = "default_true")]
    pub train_on_startup: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            stopwords_path: None,
            train_on_startup: true,
        }
    }
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub twitter: TwitterConfig,

    #[serde(default)]
    pub remote_model: RemoteModelConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .context(format!("Failed to parse config from {}", path.display()))
    }

    /// Load configuration, apply environment overrides, and validate.
    pub fn load_with_env() -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("SENTIMENT_PORT") {
            if let Ok(p) = port.parse() {
                self.network.port = p;
            }
        }
        if let Ok(bind) = std::env::var("SENTIMENT_BIND_ADDRESS") {
            self.network.bind = bind;
        }
        if let Ok(level) = std::env::var("SENTIMENT_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Ok(format) = std::env::var("SENTIMENT_LOG_FORMAT") {
            self.observability.log_format = format;
        }

        self.apply_credential_env_fallbacks();
    }

    /// Apply API credential environment variables.
    fn apply_credential_env_fallbacks(&mut self) {
        if let Ok(key) = std::env::var("TWITTER_CONSUMER_KEY") {
            self.twitter.consumer_key = Some(key);
        }
        if let Ok(secret) = std::env::var("TWITTER_CONSUMER_SECRET") {
            self.twitter.consumer_secret = Some(secret);
        }
        if let Ok(token) = std::env::var("TWITTER_ACCESS_TOKEN") {
            self.twitter.access_token = Some(token);
        }
        if let Ok(secret) = std::env::var("TWITTER_ACCESS_TOKEN_SECRET") {
            self.twitter.access_token_secret = Some(secret);
        }
        if let Ok(token) = std::env::var("HF_API_TOKEN") {
            self.remote_model.api_token = Some(token);
        }
        if let Ok(endpoint) = std::env::var("SENTIMENT_REMOTE_ENDPOINT") {
            self.remote_model.endpoint = endpoint;
        }
    }

    /// Reject values the services cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.network.port == 0 {
            return Err(Error::Config("network.port must be non-zero".into()));
        }
        if !matches!(self.observability.log_format.as_str(), "pretty" | "json") {
            return Err(Error::Config(format!(
                "observability.log_format must be \"pretty\" or \"json\", got \"{}\"",
                self.observability.log_format
            )));
        }
        if self.remote_model.timeout_secs == 0 {
            return Err(Error::Config(
                "remote_model.timeout_secs must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Socket address string the HTTP server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.network.bind, self.network.port)
    }
}
