use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// `None` keeps the server up but answers store requests with a 500.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: var("PORT")
                .map(|port| port.parse())
                .transpose()
                .context("PORT must be a number")?
                .unwrap_or(DEFAULT_PORT),
            database_url: var("DATABASE_URL"),
            max_connections: var("DATABASE_MAX_CONNECTIONS")
                .map(|max| max.parse())
                .transpose()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            acquire_timeout: Duration::from_secs(
                var("DATABASE_ACQUIRE_TIMEOUT_SECS")
                    .map(|secs| secs.parse())
                    .transpose()
                    .context("DATABASE_ACQUIRE_TIMEOUT_SECS must be a number")?
                    .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_SECS),
            ),
            run_migrations: var("RUN_MIGRATIONS")
                .is_some_and(|flag| matches!(flag.as_str(), "1" | "true" | "TRUE" | "yes")),
        })
    }

    /// The connection target without credentials, for logging.
    pub fn database_host(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(|url| url.split('@').next_back().unwrap_or("unknown"))
    }
}
