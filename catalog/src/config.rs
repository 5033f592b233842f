//! Server configuration loaded from the environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `CATALOG_BIND_ADDR` | `0.0.0.0:4000` | Listen address for REST and GraphQL |
//! | `CATALOG_STORE` | `memory` | `memory` or `mongodb` |
//! | `CATALOG_SEED_DEMO` | `false` | Seed the in-memory store with demo products |
//! | `CATALOG_CORS_ORIGINS` | `*` | Comma separated allowed origins |
//! | `MONGO_URI` | none | Required when `CATALOG_STORE=mongodb` |
//! | `MONGO_DATABASE` | `shop` | |
//! | `MONGO_COLLECTION` | `products` | |
//! | `MONGO_TIMEOUT_MS` | `5000` | Server selection and connect timeout |

use serde::{Deserialize, Serialize};
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("MONGO_URI must be set when CATALOG_STORE=mongodb")]
    MissingMongoUri,
    #[error("the mongodb store was selected but this build does not include the `mongodb` feature")]
    MongoFeatureDisabled,
}

/// Which backend the process runs on. Chosen once at start-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Memory,
    #[serde(rename = "mongodb")]
    MongoDb,
}

impl FromStr for StoreKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreKind::Memory),
            "mongodb" | "mongo" => Ok(StoreKind::MongoDb),
            _ => Err(()),
        }
    }
}

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreKind,
    /// Only honoured by the in-memory store.
    pub seed_demo: bool,
    pub mongo: MongoConfig,
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 4000),
            store: StoreKind::default(),
            seed_demo: false,
            mongo: MongoConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

/// MongoDB connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoConfig {
    pub uri: Option<String>,
    pub database: String,
    pub collection: String,
    pub timeout_ms: u64,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: None,
            database: "shop".to_string(),
            collection: "products".to_string(),
            timeout_ms: 5000,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// `*` allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    /// Loads configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup, starting from defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("CATALOG_BIND_ADDR") {
            config.bind_addr = parse("CATALOG_BIND_ADDR", value)?;
        }
        if let Some(value) = lookup("CATALOG_STORE") {
            config.store = parse("CATALOG_STORE", value)?;
        }
        if let Some(value) = lookup("CATALOG_SEED_DEMO") {
            config.seed_demo = parse("CATALOG_SEED_DEMO", value)?;
        }
        if let Some(value) = lookup("CATALOG_CORS_ORIGINS") {
            config.cors.allowed_origins = value
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(value) = lookup("MONGO_URI") {
            config.mongo.uri = Some(value);
        }
        if let Some(value) = lookup("MONGO_DATABASE") {
            config.mongo.database = value;
        }
        if let Some(value) = lookup("MONGO_COLLECTION") {
            config.mongo.collection = value;
        }
        if let Some(value) = lookup("MONGO_TIMEOUT_MS") {
            config.mongo.timeout_ms = parse("MONGO_TIMEOUT_MS", value)?;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store == StoreKind::MongoDb {
            if !cfg!(feature = "mongodb") {
                return Err(ConfigError::MongoFeatureDisabled);
            }
            if self.mongo.uri.as_deref().is_none_or(str::is_empty) {
                return Err(ConfigError::MissingMongoUri);
            }
        }

        if self.mongo.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "MONGO_TIMEOUT_MS",
                value: "0".to_string(),
            });
        }

        Ok(())
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}
