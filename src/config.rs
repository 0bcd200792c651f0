use sqlx::{postgres::PgPoolOptions, PgPool};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not valid: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Process configuration, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Postgres connection string; in-memory stores are used when absent
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub trust_proxy_headers: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the process env
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let bind_addr = match lookup("BIND_ADDR") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "BIND_ADDR",
                value,
            })?,
            None => DEFAULT_BIND_ADDR
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    name: "BIND_ADDR",
                    value: DEFAULT_BIND_ADDR.to_string(),
                })?,
        };

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => match value.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "DATABASE_MAX_CONNECTIONS",
                        value,
                    })
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let trust_proxy_headers = match lookup("TRUST_PROXY_HEADERS") {
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "TRUST_PROXY_HEADERS",
                        value,
                    })
                }
            },
            None => false,
        };

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            trust_proxy_headers,
        })
    }

    /// Connects the shared pool; `None` when no database is configured
    pub async fn connect_pool(&self) -> Result<Option<PgPool>, sqlx::Error> {
        let Some(url) = &self.database_url else {
            return Ok(None);
        };

        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(url)
            .await?;
        Ok(Some(pool))
    }
}
