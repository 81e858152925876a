//! User preferences and API configuration
//!
//! Preferences are read once and handed to async actions as read-only
//! inputs. They load from a JSON document, with environment variables
//! taking precedence over the file.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Overrides `Preferences::region`
pub const REGION_ENV: &str = "MOVIEFLUX_REGION";
/// Overrides `Preferences::language`
pub const LANGUAGE_ENV: &str = "MOVIEFLUX_LANGUAGE";
/// Overrides `Preferences::always_original_title` (`1`/`true`/`yes`)
pub const ALWAYS_ORIGINAL_TITLE_ENV: &str = "MOVIEFLUX_ALWAYS_ORIGINAL_TITLE";

/// Default catalog API root
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read preferences: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse preferences: {0}")]
    Parse(#[from] serde_json::Error),
}

/// User preferences consumed by fetches and views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Show `original_title` instead of the localized title
    #[serde(default)]
    pub always_original_title: bool,

    /// Region passed to region-aware listings
    #[serde(default = "default_region")]
    pub region: String,

    /// Language passed with every request
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_region() -> String {
    "US".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            always_original_title: false,
            region: default_region(),
            language: default_language(),
        }
    }
}

impl Preferences {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file, then apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let preferences = Self::from_json_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded preferences");
        Ok(preferences.with_env_overrides())
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by the `*_ENV` names
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(region) = non_empty(REGION_ENV) {
            self.region = region;
        }
        if let Some(language) = non_empty(LANGUAGE_ENV) {
            self.language = language;
        }
        if let Some(flag) = non_empty(ALWAYS_ORIGINAL_TITLE_ENV) {
            match flag.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.always_original_title = true,
                "0" | "false" | "no" => self.always_original_title = false,
                other => {
                    tracing::warn!(value = %other, "ignoring invalid {}", ALWAYS_ORIGINAL_TITLE_ENV)
                }
            }
        }
        self
    }
}

/// Where and how requests are sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub language: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            language: default_language(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Use the language from `preferences`
    pub fn with_preferences(mut self, preferences: &Preferences) -> Self {
        self.language = preferences.language.clone();
        self
    }
}
