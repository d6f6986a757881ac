//! Configuration settings for the quizboard service.
//!
//! Settings have an explicit load/save lifecycle: loaded once at startup
//! (from an explicit path or the standard locations) and written back only
//! when the user updates them via `quizboard config`.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub holidays: HolidayConfig,
    pub suggestions: SuggestionConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the standard locations or use defaults.
    pub fn load() -> Result<Self> {
        for path in Self::standard_paths() {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Write the configuration back to disk.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::WriteFile)?;
        }
        std::fs::write(path.as_ref(), content).map_err(ConfigError::WriteFile)?;
        tracing::info!("Saved config to: {}", path.as_ref().display());
        Ok(())
    }

    /// The path `save` targets when the user has no config file yet.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("quizboard/config.toml"))
            .unwrap_or_else(|| PathBuf::from("quizboard.toml"))
    }

    fn standard_paths() -> Vec<PathBuf> {
        [
            Some(PathBuf::from("quizboard.toml")),
            dirs::config_dir().map(|p| p.join("quizboard/config.toml")),
            dirs::home_dir().map(|p| p.join(".quizboard/config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        match self.store.backend {
            StoreBackendType::RestTable => {
                if self.store.rest_table.base_url.is_empty() {
                    return Err(
                        ConfigError::MissingField("store.rest_table.base_url".to_string()).into(),
                    );
                }
                if self.store.rest_table.api_key.is_none() {
                    return Err(
                        ConfigError::MissingField("store.rest_table.api_key".to_string()).into(),
                    );
                }
                if self.store.rest_table.table.is_empty() {
                    return Err(
                        ConfigError::MissingField("store.rest_table.table".to_string()).into(),
                    );
                }
            }
            StoreBackendType::Document => {
                let doc = &self.store.document;
                for (value, field) in [
                    (&doc.owner, "store.document.owner"),
                    (&doc.repo, "store.document.repo"),
                    (&doc.path, "store.document.path"),
                ] {
                    if value.is_empty() {
                        return Err(ConfigError::MissingField(field.to_string()).into());
                    }
                }
                if doc.token.is_none() {
                    return Err(
                        ConfigError::MissingField("store.document.token".to_string()).into()
                    );
                }
            }
            StoreBackendType::Memory => {}
        }

        if self.holidays.country.is_empty() {
            return Err(ConfigError::Invalid("holidays.country must not be empty".to_string()).into());
        }
        if self.holidays.timeout_secs == 0 {
            return Err(ConfigError::Invalid("holidays.timeout_secs must be > 0".to_string()).into());
        }

        Ok(())
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP port the REST API binds to.
    pub http_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { http_port: 8080 }
    }
}

/// Quiz store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend type: "memory", "rest_table" or "document".
    pub backend: StoreBackendType,
    /// REST table backend settings.
    pub rest_table: RestTableConfig,
    /// Versioned document backend settings.
    pub document: DocumentConfig,
}

/// Store backend type enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackendType {
    /// In-process store, no persistence. Useful offline and in tests.
    #[default]
    Memory,
    /// PostgREST-style single-table CRUD service.
    RestTable,
    /// Versioned JSON document in a git repository.
    Document,
}

/// REST table backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestTableConfig {
    /// Base URL of the table service (e.g. `https://xyz.supabase.co/rest/v1`).
    pub base_url: String,
    /// API key, sent as both `apikey` and bearer token.
    pub api_key: Option<String>,
    /// Table name.
    pub table: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RestTableConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: None,
            table: "quizzes".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Versioned document backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Contents API base URL.
    pub api_base: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Path of the JSON document inside the repository.
    pub path: String,
    /// Access token.
    pub token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            owner: String::new(),
            repo: String::new(),
            path: "quizzes.json".to_string(),
            token: None,
            timeout_secs: 10,
        }
    }
}

/// Holiday source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HolidayConfig {
    /// Base URL of the public holiday API.
    pub base_url: String,
    /// ISO country code to fetch holidays for.
    pub country: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HolidayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://date.nager.at".to_string(),
            country: "FR".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Suggestion service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Base URL of the generative language API.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// API key (loaded from the GEMINI_API_KEY environment variable if not set).
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}
