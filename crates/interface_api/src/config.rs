//! API configuration

use std::time::Duration;

use serde::Deserialize;

use core_kernel::Timezone;
use domain_motor::expiry::DEFAULT_CHECK_INTERVAL;
use domain_motor::WatcherConfig;
use infra_db::DatabaseConfig;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// API configuration
///
/// Every field has a default, so an empty environment yields a working
/// local setup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Maximum database connections
    pub max_connections: u32,
    /// Seconds a query waits for a pooled connection
    pub db_acquire_timeout_secs: u64,
    /// Log level, used when `RUST_LOG` is unset
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Seconds between two expiry scans
    pub expiry_check_interval_secs: u64,
    /// IANA timezone deciding which calendar day "today" is
    pub timezone: Timezone,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/motor_insurance".to_string(),
            max_connections: 10,
            db_acquire_timeout_secs: 5,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            expiry_check_interval_secs: DEFAULT_CHECK_INTERVAL.as_secs(),
            timezone: Timezone::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_`-prefixed environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds the record store pool settings
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(&self.database_url)
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(self.db_acquire_timeout_secs))
    }

    /// Builds the expiry watcher configuration
    ///
    /// A zero interval is raised to one second.
    pub fn watcher_config(&self) -> WatcherConfig {
        WatcherConfig {
            interval: Duration::from_secs(self.expiry_check_interval_secs.max(1)),
            timezone: self.timezone,
        }
    }
}
