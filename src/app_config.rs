use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Languages offered to the visitor, code -> display name
    #[serde(default = "default_supported_languages")]
    pub supported_languages: BTreeMap<String, String>,

    /// Language the page content is authored in
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Lifetime of a cached translation in milliseconds (0 keeps entries forever)
    #[serde(default = "default_cache_expiry_ms")]
    pub cache_expiry_ms: u64,

    /// Translation service config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Directory holding the durable storage slots
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    // @field: API key for the translation endpoint
    #[serde(default = "default_api_key")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Elements translated concurrently per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl TranslationConfig {
    /// Whether the API key looks like a real credential rather than a placeholder
    pub fn has_credential(&self) -> bool {
        is_configured_credential(&self.api_key)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            batch_size: default_batch_size(),
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
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Placeholder key shipped in the default configuration
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

/// Returns false for empty keys and the `YOUR_...` placeholders
pub fn is_configured_credential(api_key: &str) -> bool {
    let key = api_key.trim();
    !key.is_empty() && !key.starts_with("YOUR_")
}

fn default_supported_languages() -> BTreeMap<String, String> {
    [
        ("ko", "한국어"),
        ("en", "English"),
        ("ja", "日本語"),
        ("zh", "中文"),
        ("vi", "Tiếng Việt"),
        ("th", "ไทย"),
    ]
    .into_iter()
    .map(|(code, name)| (code.to_string(), name.to_string()))
    .collect()
}

fn default_language() -> String {
    "ko".to_string()
}

fn default_cache_expiry_ms() -> u64 {
    24 * 60 * 60 * 1000 // 24 hours
}

fn default_api_key() -> String {
    PLACEHOLDER_API_KEY.to_string()
}

fn default_endpoint() -> String {
    "https://translation.googleapis.com/language/translate/v2".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_batch_size() -> usize {
    10
}

impl Config {
    /// Load the configuration from a JSON file, writing the defaults when it doesn't exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

            return Ok(config);
        }

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.supported_languages.is_empty() {
            return Err(anyhow!("At least one supported language is required"));
        }

        for code in self.supported_languages.keys() {
            crate::language_utils::validate_language_code(code)
                .with_context(|| format!("Unsupported language entry '{}'", code))?;
        }

        if !self.supported_languages.contains_key(&self.default_language) {
            return Err(anyhow!(
                "Default language '{}' is not in the supported languages",
                self.default_language
            ));
        }

        if self.translation.batch_size == 0 {
            return Err(anyhow!("Translation batch size must be at least 1"));
        }

        Url::parse(&self.translation.endpoint)
            .with_context(|| format!("Invalid translation endpoint: {}", self.translation.endpoint))?;

        Ok(())
    }

    /// Whether the code is one of the supported languages
    pub fn is_supported(&self, code: &str) -> bool {
        self.supported_languages.contains_key(code)
    }

    /// Display name for a supported language
    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.supported_languages.get(code).map(String::as_str)
    }

    /// Resolve the storage directory, falling back to the platform data directory
    pub fn resolve_storage_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.storage_dir {
            return Ok(dir.clone());
        }

        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .ok_or_else(|| anyhow!("Could not determine data directory"))?;

        Ok(base_dir.join("sitelingo"))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            supported_languages: default_supported_languages(),
            default_language: default_language(),
            cache_expiry_ms: default_cache_expiry_ms(),
            translation: TranslationConfig::default(),
            storage_dir: None,
            log_level: LogLevel::default(),
        }
    }
}
