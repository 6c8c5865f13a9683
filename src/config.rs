use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Which `BookStore` implementation the gateway serves from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow::anyhow!(
                "Unknown STORE_BACKEND '{}' (expected 'postgres' or 'memory')",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gateway_host: String,
    pub gateway_port: u16,
    pub store_backend: StoreBackend,
    pub max_connections: u32,
    pub pool_timeout: Duration,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't have to touch the process env.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // Build database_url from individual fields or use DATABASE_URL if provided
        let database_url = if let Some(url) = lookup("DATABASE_URL") {
            url
        } else {
            let db_host = var("DB_HOST", "localhost");
            let db_port = var("DB_PORT", "5432");
            let db_name = var("DB_NAME", "books");
            let db_user = var("DB_USER", "books");
            let db_password = var("DB_PASSWORD", "123");

            // URL-encode password to handle special characters
            let encoded_password = urlencoding::encode(&db_password);

            format!(
                "postgres://{}:{}@{}:{}/{}",
                db_user, encoded_password, db_host, db_port, db_name
            )
        };

        let gateway_host = var("GATEWAY_HOST", "0.0.0.0");

        let gateway_port = var("GATEWAY_PORT", "8080").parse().unwrap_or(8080);

        let store_backend = var("STORE_BACKEND", "postgres").parse()?;

        let max_connections = var("MAX_CONNECTIONS", "10").parse().unwrap_or(10);

        let pool_timeout_secs: u64 = var("POOL_TIMEOUT_SECS", "5").parse().unwrap_or(5);

        let log_dir = PathBuf::from(var("LOG_DIR", "./logs"));

        Ok(Config {
            database_url,
            gateway_host,
            gateway_port,
            store_backend,
            max_connections,
            pool_timeout: Duration::from_secs(pool_timeout_secs),
            log_dir,
        })
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.gateway_host, self.gateway_port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address: {}", e))
    }

    /// Database name at the end of the connection URL, for log and error messages.
    pub fn database_name(&self) -> &str {
        let without_query = self
            .database_url
            .split('?')
            .next()
            .unwrap_or(&self.database_url);
        without_query.rsplit('/').next().unwrap_or(without_query)
    }
}
