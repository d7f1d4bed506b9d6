use anyhow::{Context, Result, anyhow};
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Translation service config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Clip playback config
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Whether captured transcripts are translated until told otherwise
    #[serde(default = "default_true")]
    pub translate_by_default: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Remote analyze service
    #[default]
    Analyze,
    // @provider: Offline word list
    Lexicon,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Analyze => "Analyze service",
            Self::Lexicon => "Offline lexicon",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Analyze => "analyze".to_string(),
            Self::Lexicon => "lexicon".to_string(),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "analyze" => Ok(Self::Analyze),
            "lexicon" => Ok(Self::Lexicon),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Base URL of the analyze service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl TranslationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Clip playback configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaybackConfig {
    /// Directory or http(s) URL that clip identifiers are relative to
    #[serde(default = "default_asset_base")]
    pub asset_base: String,

    /// How long the simulated player shows each clip, in milliseconds
    #[serde(default = "default_clip_duration_ms")]
    pub clip_duration_ms: u64,
}

impl PlaybackConfig {
    pub fn clip_duration(&self) -> Duration {
        Duration::from_millis(self.clip_duration_ms)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            asset_base: default_asset_base(),
            clip_duration_ms: default_clip_duration_ms(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_endpoint() -> String {
    "https://aurisvue-api.onrender.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_asset_base() -> String {
    "/videos/".to_string()
}

fn default_clip_duration_ms() -> u64 {
    1500
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.translation.provider == TranslationProvider::Analyze {
            let endpoint = self.translation.endpoint.trim();
            if endpoint.is_empty() {
                return Err(anyhow!("Translation endpoint is required for the analyze provider"));
            }
            let url = url::Url::parse(endpoint)
                .map_err(|e| anyhow!("Invalid translation endpoint '{}': {}", endpoint, e))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(anyhow!("Translation endpoint must use http or https: {}", endpoint));
            }
        }

        if self.translation.timeout_secs == 0 {
            return Err(anyhow!("Translation timeout must be at least one second"));
        }

        if self.playback.clip_duration_ms == 0 {
            return Err(anyhow!("Clip duration must be greater than zero"));
        }

        if self.playback.asset_base.trim().is_empty() {
            return Err(anyhow!("Clip asset base must not be empty"));
        }

        Ok(())
    }

    /// Load the configuration file, or write a default one when it doesn't exist
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let file = File::open(config_path)
                .context(format!("Failed to open config file: {}", config_path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {}", config_path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", config_path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path.display()))?;
        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            translation: TranslationConfig::default(),
            playback: PlaybackConfig::default(),
            translate_by_default: true,
            log_level: LogLevel::default(),
        }
    }
}
