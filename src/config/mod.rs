//! Configuration loading and management
//!
//! Settings come from three layers, later ones overriding earlier ones:
//!
//! 1. Built-in defaults (`localhost:5432`, user/password/database `idb`,
//!    HTTP on `0.0.0.0:8080`, gRPC on `0.0.0.0:50051`)
//! 2. An optional YAML file named by `INVOICE_CONFIG`
//! 3. `INVOICE_*` environment variables (a `.env` file is honoured)

use serde::{Deserialize, Deserializer, Serialize};
use std::net::SocketAddr;
use thiserror::Error;

/// Environment variable naming an optional YAML configuration file
pub const CONFIG_FILE_ENV: &str = "INVOICE_CONFIG";

pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_GRPC_ADDR: &str = "0.0.0.0:50051";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value for {key}: '{value}'")]
    InvalidEnv { key: String, value: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Which store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

/// Database connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Postgres,
            host: "localhost".to_string(),
            port: 5432,
            user: "idb".to_string(),
            password: "idb".to_string(),
            name: "idb".to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseConfig {
    /// Connection options for the pool, with each component passed verbatim
    #[cfg(feature = "postgres")]
    pub fn connect_options(&self) -> sqlx::postgres::PgConnectOptions {
        sqlx::postgres::PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(sqlx::postgres::PgSslMode::Disable)
    }

    /// Connection URL with the password masked, for logging
    pub fn redacted_url(&self) -> String {
        format!(
            "postgres://{}:***@{}:{}/{}",
            self.user, self.host, self.port, self.name
        )
    }
}

/// Listen address of one exposure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListenConfig {
    pub addr: String,
}

impl ListenConfig {
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.addr
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("'{}' is not a socket address", self.addr)))
    }
}

/// Listen section as written in YAML, where every key may be left out
#[derive(Deserialize)]
struct ListenSection {
    #[serde(default)]
    addr: Option<String>,
}

fn listen_or<'de, D: Deserializer<'de>>(
    deserializer: D,
    fallback: &str,
) -> Result<ListenConfig, D::Error> {
    let section = Option::<ListenSection>::deserialize(deserializer)?;
    let addr = section.and_then(|s| s.addr);
    Ok(ListenConfig::new(addr.unwrap_or_else(|| fallback.to_string())))
}

fn http_listen<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ListenConfig, D::Error> {
    listen_or(deserializer, DEFAULT_HTTP_ADDR)
}

fn grpc_listen<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ListenConfig, D::Error> {
    listen_or(deserializer, DEFAULT_GRPC_ADDR)
}

/// Complete service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub database: DatabaseConfig,
    #[serde(deserialize_with = "http_listen")]
    pub http: ListenConfig,
    #[serde(deserialize_with = "grpc_listen")]
    pub grpc: ListenConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            http: ListenConfig::new(DEFAULT_HTTP_ADDR),
            grpc: ListenConfig::new(DEFAULT_GRPC_ADDR),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load configuration from the process environment and validate it
    ///
    /// Reads `.env` if present, then the optional YAML file named by
    /// `INVOICE_CONFIG`, then the `INVOICE_*` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }

        let mut config = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `INVOICE_*` overrides looked up through `lookup`
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let db = &mut self.database;
        if let Some(v) = lookup("INVOICE_DB_HOST") {
            db.host = v;
        }
        if let Some(v) = lookup("INVOICE_DB_PORT") {
            db.port = parse_env("INVOICE_DB_PORT", v)?;
        }
        if let Some(v) = lookup("INVOICE_DB_USER") {
            db.user = v;
        }
        if let Some(v) = lookup("INVOICE_DB_PASSWORD") {
            db.password = v;
        }
        if let Some(v) = lookup("INVOICE_DB_NAME") {
            db.name = v;
        }
        if let Some(v) = lookup("INVOICE_DB_MAX_CONNECTIONS") {
            db.max_connections = parse_env("INVOICE_DB_MAX_CONNECTIONS", v)?;
        }
        if let Some(v) = lookup("INVOICE_STORE") {
            db.backend = match v.to_ascii_lowercase().as_str() {
                "postgres" => StoreBackend::Postgres,
                "memory" => StoreBackend::Memory,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        key: "INVOICE_STORE".to_string(),
                        value: v,
                    });
                }
            };
        }
        if let Some(v) = lookup("INVOICE_HTTP_ADDR") {
            self.http.addr = v;
        }
        if let Some(v) = lookup("INVOICE_GRPC_ADDR") {
            self.grpc.addr = v;
        }
        Ok(())
    }

    /// Reject configurations the service cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let db = &self.database;
        if db.backend == StoreBackend::Postgres {
            if db.host.trim().is_empty() {
                return Err(ConfigError::Invalid("database host must not be empty".into()));
            }
            if db.port == 0 {
                return Err(ConfigError::Invalid("database port must be in 1..=65535".into()));
            }
            if db.user.trim().is_empty() {
                return Err(ConfigError::Invalid("database user must not be empty".into()));
            }
            if db.name.trim().is_empty() {
                return Err(ConfigError::Invalid("database name must not be empty".into()));
            }
            if db.max_connections == 0 {
                return Err(ConfigError::Invalid(
                    "database max_connections must be at least 1".into(),
                ));
            }
        }

        let http = self.http.socket_addr()?;
        let grpc = self.grpc.socket_addr()?;
        if http == grpc {
            return Err(ConfigError::Invalid(format!(
                "HTTP and gRPC cannot share the listen address {}",
                http
            )));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        key: key.to_string(),
        value,
    })
}
