//! Client configuration
//!
//! Loaded from environment variables:
//!
//! - `REDIS_TYPED_BACKEND`: `redis` (default) or `memory`
//! - `REDIS_URL`: server address for the redis backend
//!   (default `redis://127.0.0.1:6379`)
//! - `REDIS_TYPED_SEED`: RNG seed for the memory backend (default 0)
//!
//! or from a TOML document with the same fields (`backend`, `url`, `seed`).

use crate::client::Client;
use crate::error::Result;
use crate::store::MemoryStore;
use serde::Deserialize;
use std::sync::Arc;

pub const DEFAULT_URL: &str = "redis://127.0.0.1:6379";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Redis,
    Memory,
}

impl std::str::FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(Backend::Redis),
            "memory" => Ok(Backend::Memory),
            other => Err(format!("unknown backend `{}`", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub backend: Backend,
    pub url: String,
    /// Seed for SPOP / SRANDMEMBER on the memory backend
    pub seed: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            backend: Backend::Redis,
            url: DEFAULT_URL.to_string(),
            seed: 0,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    /// Unset or unparsable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        ClientConfig {
            backend: lookup("REDIS_TYPED_BACKEND")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.backend),
            url: lookup("REDIS_URL").unwrap_or(defaults.url),
            seed: lookup("REDIS_TYPED_SEED")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.seed),
        }
    }

    pub fn from_toml_str(source: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Build the configured store and wrap it in a `Client`.
    pub async fn connect(&self) -> Result<Client> {
        match self.backend {
            Backend::Memory => Ok(Client::new(Arc::new(MemoryStore::with_seed(self.seed)))),
            #[cfg(feature = "redis-backend")]
            Backend::Redis => {
                let store = crate::store::RedisStore::connect(&self.url).await?;
                Ok(Client::new(Arc::new(store)))
            }
            #[cfg(not(feature = "redis-backend"))]
            Backend::Redis => Err(crate::error::Error::InvalidArgument(
                "redis backend requires the `redis-backend` feature".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.backend, Backend::Redis);
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.seed, 0);
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("REDIS_TYPED_BACKEND", "Memory"),
            ("REDIS_URL", "redis://cache:6380/2"),
            ("REDIS_TYPED_SEED", "not-a-number"),
        ]
        .into_iter()
        .collect();
        let config = ClientConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.url, "redis://cache:6380/2");
        assert_eq!(config.seed, 0);
    }

    #[test]
    fn test_partial_toml() {
        let config = ClientConfig::from_toml_str("backend = \"memory\"\nseed = 42\n").unwrap();
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.seed, 42);
        assert_eq!(config.url, DEFAULT_URL);

        assert!(ClientConfig::from_toml_str("backend = \"etcd\"").is_err());
    }

    #[tokio::test]
    async fn test_connect_memory_backend() {
        let config = ClientConfig {
            backend: Backend::Memory,
            ..ClientConfig::default()
        };
        let client = config.connect().await.unwrap();
        client.set("k", "v").await.unwrap();
        assert_eq!(client.get("k").await.unwrap(), Some("v".to_string()));
    }
}
