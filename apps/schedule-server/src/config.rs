use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration with strongly-typed sections.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database connection URL, e.g. "sqlite://schedule.db?mode=rwc".
    pub url: String,
    /// Maximum number of connections in the pool (optional, defaults to 10).
    pub max_conns: Option<u32>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "sqlite://schedule.db?mode=rwc".to_string(),
                max_conns: Some(10),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration with layered loading: defaults → YAML file →
    /// environment variables.
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        let figment = Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Yaml::file(config_path.as_ref()))
            // Example: APP__SERVER__PORT=8080 maps to server.port
            .merge(Env::prefixed("APP__").split("__"));

        figment
            .extract()
            .with_context(|| "Failed to extract config from figment".to_string())
    }

    /// Load configuration from file or fall back to default values.
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_layered(path),
            None => Ok(Self::default()),
        }
    }

    /// Serialize configuration to YAML (for --print-config).
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }
}
