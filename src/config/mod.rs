//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables prefixed with `RESEARCH_BANK_`. Nested keys use a
//! double underscore, so `RESEARCH_BANK_CATALOG__BASE` overrides
//! `catalog.base`.

mod file_config;

pub use file_config::{write_default_config, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ingest::HeaderLocale;
use crate::models::Language;
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::store::{FailurePolicy, StoreOptions};
use crate::utils::DEFAULT_TIMEOUT;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "RESEARCH_BANK";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "research-bank.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where the dataset catalogs come from
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Output settings
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Catalog source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory path or `http(s)://` URL holding the catalog files
    #[serde(default = "default_base")]
    pub base: String,

    #[serde(default = "default_general_file")]
    pub general_file: String,

    #[serde(default = "default_medical_file")]
    pub medical_file: String,

    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Language of the catalog header rows
    #[serde(default)]
    pub header_locale: HeaderLocale,

    /// HTTP fetch timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            general_file: default_general_file(),
            medical_file: default_medical_file(),
            failure_policy: FailurePolicy::default(),
            header_locale: HeaderLocale::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CatalogConfig {
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            general_file: self.general_file.clone(),
            medical_file: self.medical_file.clone(),
            header_locale: self.header_locale,
            failure_policy: self.failure_policy,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base() -> String {
    "data".to_string()
}

fn default_general_file() -> String {
    "general_datasets.csv".to_string()
}

fn default_medical_file() -> String {
    "medical_datasets.csv".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default)]
    pub language: Language,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            language: Language::default(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `"json"` switches to structured output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Platform config file location, e.g. `~/.config/research-bank/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("research-bank").join("config.toml"))
}

/// First existing config file: `./research-bank.toml`, then the user config
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    user_config_path().filter(|path| path.is_file())
}

/// Load configuration.
///
/// An explicit `path` must exist. Without one, the discovered config file is
/// used if any. Environment variables apply on top either way.
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    let env = config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true);

    match path {
        Some(path) => build_config(Some(path), true, env),
        None => {
            let found = find_config_file();
            build_config(found.as_deref(), false, env)
        }
    }
}

fn build_config(
    path: Option<&Path>,
    required: bool,
    env: config::Environment,
) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        tracing::debug!(path = %path.display(), "Reading config file");
        builder = builder.add_source(
            config::File::from(path)
                .format(config::FileFormat::Toml)
                .required(required),
        );
    }

    builder.add_source(env).build()?.try_deserialize()
}

/// Get the configuration from the discovered file and environment, falling
/// back to defaults if it cannot be read
pub fn get_config() -> Config {
    load_config(None).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring invalid configuration");
        Config::default()
    })
}
