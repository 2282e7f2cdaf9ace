use std::net::SocketAddr;

use anyhow::Context;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 16;
const DEFAULT_API_PATH: &str = "/api";

/// Settings fixed at process start. Built once in `main` and handed to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// sqlx sqlite url, e.g. `sqlite://farm.db`
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub max_connections: u32,
    /// Path the booking/contact endpoint is served on.
    pub api_path: String,
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL is not set")?;

        let listen_addr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned())
            .parse()
            .context("LISTEN_ADDR is not a socket address")?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(n) => n.parse().context("DB_MAX_CONNECTIONS is not a number")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        anyhow::ensure!(max_connections > 0, "DB_MAX_CONNECTIONS must be at least 1");

        let api_path = lookup("API_PATH").unwrap_or_else(|| DEFAULT_API_PATH.to_owned());
        anyhow::ensure!(api_path.starts_with('/'), "API_PATH must start with '/'");

        Ok(Config {
            database_url,
            listen_addr,
            max_connections,
            api_path,
        })
    }
}
