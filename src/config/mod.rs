use std::env;
use std::time::Duration;

use url::Url;

use crate::errors::ConfigError;

pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_CATALOG_URL: &str = "http://localhost:8000";
pub const DEFAULT_CATALOG_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_addr: String,
    pub catalog_url: Url,
    pub catalog_timeout: Duration,
}

impl AppConfig {
    /// Reads `SERVER_ADDR`, `BEVERAGE_API_URL` and `CATALOG_TIMEOUT_MS`,
    /// after loading a `.env` file if one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_addr = lookup("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.into());

        let raw_url = lookup("BEVERAGE_API_URL").unwrap_or_else(|| DEFAULT_CATALOG_URL.into());
        let catalog_url = Url::parse(&raw_url).map_err(|e| ConfigError::Invalid {
            var: "BEVERAGE_API_URL",
            reason: format!("{raw_url}: {e}"),
        })?;

        let timeout_ms = match lookup("CATALOG_TIMEOUT_MS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: "CATALOG_TIMEOUT_MS",
                reason: format!("{raw}: {e}"),
            })?,
            None => DEFAULT_CATALOG_TIMEOUT_MS,
        };

        Ok(Self {
            server_addr,
            catalog_url,
            catalog_timeout: Duration::from_millis(timeout_ms),
        })
    }
}
