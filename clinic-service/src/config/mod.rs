use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct ClinicConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub store: StoreBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    /// Only required for the `mongo` backend.
    pub uri: Option<Secret<String>>,
    pub database: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl ClinicConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;
        let env = EnvReader::from_environment();

        let store: StoreBackend = env
            .get("STORE_BACKEND", Some("mongo"))?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let uri = match store {
            StoreBackend::Mongo => Some(Secret::new(env.get("MONGODB_URI", None)?)),
            StoreBackend::Memory => env.optional("MONGODB_URI").map(Secret::new),
        };

        Ok(ClinicConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri,
                database: env.get("MONGODB_DATABASE", Some("clinic_db"))?,
            },
            store,
        })
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

/// Reads service settings from the process environment.
///
/// With `ENVIRONMENT=prod` no defaults are applied, so every setting has to be
/// set explicitly.
struct EnvReader {
    is_prod: bool,
}

impl EnvReader {
    fn from_environment() -> Self {
        Self {
            is_prod: env::var("ENVIRONMENT").is_ok_and(|v| v == "prod"),
        }
    }

    fn optional(&self, key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.trim().is_empty())
    }

    fn get(&self, key: &str, default: Option<&str>) -> Result<String, AppError> {
        if let Some(value) = self.optional(key) {
            return Ok(value);
        }
        match default {
            Some(def) if !self.is_prod => Ok(def.to_string()),
            Some(_) => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required in production but not set",
                key
            ))),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        }
    }
}
