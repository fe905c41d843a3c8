//! Configuration loader
//!
//! Handles loading configuration from various sources including
//! TOML files, environment variables, and default values.

use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use wql_domain::error::{Error, Result};

use crate::config::{AppConfig, CacheConfig, LoggingConfig, NotifierConfig, WarehouseConfig};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::parse_log_level;

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first default location found)
    /// 3. Environment variables with prefix (e.g., `WQL__WAREHOUSE__PROJECT_ID`)
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not. Nothing is logged here since loading usually runs before
    /// the subscriber exists; see [`Self::source_path`].
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if !config_path.exists() {
                return Err(Error::configuration(format!(
                    "Configuration file not found: {}",
                    config_path.display()
                )));
            }
            figment = figment.merge(Toml::file(config_path));
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Double underscore separates nested keys so field names keep theirs.
        figment = figment.merge(
            Env::prefixed(&format!("{}{}", self.env_prefix, CONFIG_ENV_SEPARATOR))
                .split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context(format!(
            "Failed to write config file {}",
            path.as_ref().display()
        ))?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// File [`Self::load`] reads: the explicit path when it exists, else the
    /// first default location found
    pub fn source_path(&self) -> Option<PathBuf> {
        match &self.config_path {
            Some(path) => path.exists().then(|| path.clone()),
            None => Self::find_default_config_path(),
        }
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Performs validation of all configuration sections.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_warehouse_config(&config.warehouse)?;
    validate_tables_config(config)?;
    validate_cache_config(&config.cache)?;
    validate_notifier_config(&config.notifier)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

fn validate_warehouse_config(config: &WarehouseConfig) -> Result<()> {
    if config.provider.trim().is_empty() {
        return Err(Error::Configuration {
            message: "Warehouse provider cannot be empty".to_string(),
            source: None,
        });
    }
    if !config.is_offline() {
        if config.project_id.trim().is_empty() {
            return Err(Error::Configuration {
                message: format!(
                    "Warehouse project_id is required for provider '{}'",
                    config.provider
                ),
                source: None,
            });
        }
        if config.dataset_id.trim().is_empty() {
            return Err(Error::Configuration {
                message: format!(
                    "Warehouse dataset_id is required for provider '{}'",
                    config.provider
                ),
                source: None,
            });
        }
    }
    if config.request_timeout_secs == 0 {
        return Err(Error::Configuration {
            message: "Warehouse request timeout cannot be 0".to_string(),
            source: None,
        });
    }
    if config.max_results_per_page == 0 {
        return Err(Error::Configuration {
            message: "Warehouse page size cannot be 0".to_string(),
            source: None,
        });
    }
    Ok(())
}

fn validate_tables_config(config: &AppConfig) -> Result<()> {
    if let Some((domain, _)) = config
        .tables
        .0
        .iter()
        .find(|(domain, table)| domain.trim().is_empty() || table.trim().is_empty())
    {
        return Err(Error::Configuration {
            message: format!("Analytics table name cannot be empty (domain '{domain}')"),
            source: None,
        });
    }
    Ok(())
}

fn validate_cache_config(config: &CacheConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }
    let ttls = [
        ("data_queries_ttl_secs", config.data_queries_ttl_secs),
        ("table_info_ttl_secs", config.table_info_ttl_secs),
        ("charts_ttl_secs", config.charts_ttl_secs),
    ];
    if let Some((name, _)) = ttls.iter().find(|(_, secs)| *secs == 0) {
        return Err(Error::Configuration {
            message: format!("Cache {name} cannot be 0 when cache is enabled"),
            source: None,
        });
    }
    Ok(())
}

fn validate_notifier_config(config: &NotifierConfig) -> Result<()> {
    if config.capacity == 0 {
        return Err(Error::Configuration {
            message: "Notifier capacity cannot be 0".to_string(),
            source: None,
        });
    }
    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    parse_log_level(&config.level).map(|_| ())
}

/// Configuration builder for programmatic configuration
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Set warehouse configuration
    pub fn with_warehouse(mut self, warehouse: WarehouseConfig) -> Self {
        self.config.warehouse = warehouse;
        self
    }

    /// Map a domain to a physical table
    pub fn with_table(mut self, domain: impl Into<String>, table: impl Into<String>) -> Self {
        self.config.tables.0.insert(domain.into(), table.into());
        self
    }

    /// Set cache configuration
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.config.cache = cache;
        self
    }

    /// Set notifier configuration
    pub fn with_notifier(mut self, notifier: NotifierConfig) -> Self {
        self.config.notifier = notifier;
        self
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }

    /// Build and validate the configuration
    pub fn build_validated(self) -> Result<AppConfig> {
        validate_app_config(&self.config)?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
