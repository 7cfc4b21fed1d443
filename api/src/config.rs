//! Command-line and environment configuration

use clap::{Parser, ValueEnum};

use crate::constants::{DEFAULT_HOST, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT};

/// Which storage backend holds the tweets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    Postgres,
    /// Process-local, lost on shutdown
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL (or --database-url) must be set when using the postgres store")]
    MissingDatabaseUrl,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "tweets-api", version, about = "CRUD HTTP service for tweets")]
pub struct Config {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[arg(long, env = "TWEETS_STORE", value_enum, default_value_t = StoreBackend::Postgres)]
    pub store: StoreBackend,

    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Comma separated list of allowed origins, `*` for any
    #[arg(long, env = "CORS_ORIGINS", value_delimiter = ',', default_value = "*")]
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)
    }
}
